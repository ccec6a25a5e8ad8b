use scene_ngin::{
    error::TextureError,
    resources::{
        decode::FileDecoder,
        texture::{MAX_TEXTURE_SLOTS, TextureRegistry},
    },
};

use crate::common::test_utils::{BackendCall, FakeDecoder, RecordingBackend, loaded_registry};

mod common;

#[test]
fn slots_follow_registration_order() {
    let (registry, _) = loaded_registry(&["desk", "coffee", "mug"]);

    assert_eq!(registry.find_slot("desk"), Some(0));
    assert_eq!(registry.find_slot("coffee"), Some(1));
    assert_eq!(registry.find_slot("mug"), Some(2));
    assert_eq!(registry.len(), 3);
}

#[test]
fn slots_stay_put_when_more_textures_are_loaded() {
    let decoder = FakeDecoder::new()
        .with_image("desk.jpg", 2, 2, 3)
        .with_image("floor.jpg", 4, 4, 4)
        .with_image("screen.jpg", 4, 2, 3);
    let mut registry = TextureRegistry::new(RecordingBackend::new(), decoder);
    assert_eq!(registry.load("desk.jpg", "desk").ok(), Some(0));

    registry.load("floor.jpg", "floor").expect("floor loads");
    registry.load("screen.jpg", "screen").expect("screen loads");

    assert_eq!(registry.find_slot("desk"), Some(0));
    assert_eq!(registry.find_slot("screen"), Some(2));
}

#[test]
fn unknown_tag_is_a_miss_without_side_effects() {
    let (registry, backend) = loaded_registry(&["desk"]);
    let calls_before = backend.calls();

    assert_eq!(registry.find_slot("nope"), None);
    assert!(registry.find_handle("nope").is_none());

    assert_eq!(registry.len(), 1);
    assert_eq!(backend.calls(), calls_before);
}

#[test]
fn find_handle_returns_the_uploaded_handle() {
    let (registry, _) = loaded_registry(&["desk", "mug"]);
    assert_eq!(registry.find_handle("desk"), Some(&0));
    assert_eq!(registry.find_handle("mug"), Some(&1));
}

#[test]
fn duplicate_tag_is_rejected_and_the_first_entry_wins() {
    let decoder = FakeDecoder::new()
        .with_image("a.png", 2, 2, 3)
        .with_image("b.png", 8, 8, 4);
    let backend = RecordingBackend::new();
    let mut registry = TextureRegistry::new(backend.clone(), decoder);

    assert_eq!(registry.load("a.png", "wood").ok(), Some(0));
    let second = registry.load("b.png", "wood");

    assert!(matches!(second, Err(TextureError::DuplicateTag(tag)) if tag == "wood"));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.find_slot("wood"), Some(0));
    assert_eq!(registry.find_handle("wood"), Some(&0));
    // Nothing was uploaded for the rejected load.
    assert_eq!(backend.calls(), vec![BackendCall::Upload("wood".to_string())]);
}

#[test]
fn sixteen_textures_fit_and_the_seventeenth_is_rejected() {
    let tags: Vec<String> = (0..=MAX_TEXTURE_SLOTS).map(|i| format!("t{i}")).collect();
    let decoder = tags
        .iter()
        .fold(FakeDecoder::new(), |decoder, tag| decoder.with_image(format!("{tag}.png"), 1, 1, 4));
    let mut registry = TextureRegistry::new(RecordingBackend::new(), decoder);

    for (i, tag) in tags.iter().take(MAX_TEXTURE_SLOTS).enumerate() {
        assert_eq!(registry.load(format!("{tag}.png"), tag).ok(), Some(i));
    }
    let overflow = &tags[MAX_TEXTURE_SLOTS];
    let result = registry.load(format!("{overflow}.png"), overflow);

    assert!(matches!(result, Err(TextureError::SlotsExhausted(_))));
    assert_eq!(registry.len(), MAX_TEXTURE_SLOTS);
    for (i, tag) in tags.iter().take(MAX_TEXTURE_SLOTS).enumerate() {
        assert_eq!(registry.find_slot(tag), Some(i));
    }
}

#[test]
fn decode_failure_is_reported_and_loading_continues() {
    let decoder = FakeDecoder::new()
        .with_image("desk.jpg", 2, 2, 3)
        .with_image("mug.jpg", 2, 2, 3);
    let mut registry = TextureRegistry::new(RecordingBackend::new(), decoder);

    assert!(registry.load("desk.jpg", "desk").is_ok());
    let missing = registry.load("missing.jpg", "missing");
    assert!(matches!(missing, Err(TextureError::Decode { .. })));
    assert_eq!(registry.load("mug.jpg", "mug").ok(), Some(1));

    assert_eq!(registry.find_slot("missing"), None);
    assert_eq!(registry.len(), 2);
}

#[test]
fn only_rgb_and_rgba_images_are_accepted() {
    let decoder = FakeDecoder::new()
        .with_image("grey.png", 2, 2, 1)
        .with_image("grey_alpha.png", 2, 2, 2)
        .with_image("rgb.png", 2, 2, 3)
        .with_image("rgba.png", 2, 2, 4);
    let mut registry = TextureRegistry::new(RecordingBackend::new(), decoder);

    let grey = registry.load("grey.png", "grey");
    assert!(matches!(grey, Err(TextureError::UnsupportedFormat { channels: 1, .. })));
    let grey_alpha = registry.load("grey_alpha.png", "grey_alpha");
    assert!(matches!(grey_alpha, Err(TextureError::UnsupportedFormat { channels: 2, .. })));

    assert_eq!(registry.load("rgb.png", "rgb").ok(), Some(0));
    assert_eq!(registry.load("rgba.png", "rgba").ok(), Some(1));
}

#[test]
fn upload_failure_registers_nothing() {
    let decoder = FakeDecoder::new()
        .with_image("a.png", 2, 2, 3)
        .with_image("b.png", 2, 2, 3);
    let mut backend = RecordingBackend::new();
    backend.rejected.push("a".to_string());
    let mut registry = TextureRegistry::new(backend, decoder);

    assert!(matches!(registry.load("a.png", "a"), Err(TextureError::Upload { .. })));
    assert_eq!(registry.load("b.png", "b").ok(), Some(0));
}

#[test]
fn bind_all_binds_each_texture_to_its_slot_in_ascending_order() {
    let tags = [
        "desk",
        "coffee",
        "mug",
        "floor",
        "keyboard",
        "screen",
        "handle",
        "paper_book",
    ];
    let (mut registry, backend) = loaded_registry(&tags);
    backend.log.borrow_mut().clear();

    registry.bind_all();

    let expected: Vec<BackendCall> = (0..tags.len())
        .map(|slot| BackendCall::Bind {
            slot,
            handle: slot as u32,
        })
        .collect();
    assert_eq!(backend.calls(), expected);
    assert_eq!(registry.find_slot("paper_book"), Some(7));
}

#[test]
fn clear_unbinds_then_releases_every_handle() {
    let (mut registry, backend) = loaded_registry(&["desk", "mug"]);
    backend.log.borrow_mut().clear();

    registry.clear();

    assert_eq!(
        backend.calls(),
        vec![
            BackendCall::UnbindAll,
            BackendCall::Release(0),
            BackendCall::Release(1)
        ]
    );
    assert!(registry.is_empty());
    assert_eq!(registry.find_slot("desk"), None);
}

#[test]
fn dropping_the_registry_releases_its_textures() {
    let (registry, backend) = loaded_registry(&["desk"]);
    backend.log.borrow_mut().clear();

    drop(registry);

    assert_eq!(
        backend.calls(),
        vec![BackendCall::UnbindAll, BackendCall::Release(0)]
    );
}

#[test]
fn a_cleared_registry_starts_again_at_slot_zero() {
    let decoder = FakeDecoder::new().with_image("a.png", 2, 2, 3);
    let mut registry = TextureRegistry::new(RecordingBackend::new(), decoder);
    assert_eq!(registry.load("a.png", "a").ok(), Some(0));

    registry.clear();

    assert_eq!(registry.load("a.png", "a").ok(), Some(0));
}

#[test]
fn a_malformed_file_on_disk_gets_no_slot() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("broken.png"), b"GIF89a but not really").expect("file is written");
    image::RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 255]))
        .save(dir.path().join("desk.png"))
        .expect("png is written");
    let backend = RecordingBackend::new();
    let mut registry = TextureRegistry::new(backend.clone(), FileDecoder::new(dir.path()));

    let broken = registry.load("broken.png", "broken");
    let desk = registry.load("desk.png", "desk");

    assert!(matches!(broken, Err(TextureError::Decode { .. })));
    assert_eq!(desk.ok(), Some(0));
    assert_eq!(registry.find_slot("broken"), None);
    assert_eq!(registry.len(), 1);
    assert_eq!(backend.calls().len(), 1);
}
