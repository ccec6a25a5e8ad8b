use scene_ngin::{desk::desk_scene, flow::run, settings::Settings};

fn main() -> anyhow::Result<()> {
    run(Settings::from_env(), desk_scene())
}
