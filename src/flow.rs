//! Application event loop.
//!
//! Opens a window, prepares one [`SceneDescription`] on the GPU and draws it
//! every frame:
//!
//! 1. `resumed` creates the [`Context`] and prepares the scene once
//!    (textures, materials, lights and meshes)
//! 2. every redraw replays the scene's draw protocol into a [`DrawList`],
//!    carrying the draw state over from the previous frame
//! 3. the [`SceneRenderer`] uploads the recorded snapshots and issues the draws
//! 4. on exit the scene's textures are released

use std::{iter, sync::Arc};

use instant::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    assembly::SceneAssembly,
    context::Context,
    data_structures::{draw_state::DrawState, scene::SceneDescription, texture::Texture},
    render::{DrawList, SceneRenderer, SceneUniforms},
    resources::{
        decode::FileDecoder,
        texture::{GpuTextures, TextureRegistry},
    },
    settings::Settings,
};

/// GPU context plus the prepared scene and what its draws produced.
pub struct AppState {
    pub(crate) ctx: Context,
    assembly: SceneAssembly<GpuTextures>,
    uniforms: SceneUniforms,
    draws: DrawList,
    draw_state: DrawState,
    renderer: SceneRenderer,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, settings: &Settings, scene: SceneDescription) -> anyhow::Result<Self> {
        let ctx = Context::new(window, settings).await?;

        if let Err(issues) = scene.validate() {
            for issue in &issues {
                log::warn!("Scene problem: {issue}");
            }
        }

        let backend = GpuTextures::new(&ctx.device, &ctx.queue);
        let renderer = SceneRenderer::new(&ctx.device, &ctx.config, &ctx.camera.bind_group_layout, backend.layout());
        let textures = TextureRegistry::new(backend, FileDecoder::new(&settings.asset_root));
        let mut assembly = SceneAssembly::new(scene, textures);

        let mut uniforms = SceneUniforms::default();
        let mut draws = DrawList::new();
        assembly.prepare(&mut uniforms, &mut draws);

        Ok(Self {
            ctx,
            assembly,
            uniforms,
            draws,
            draw_state: DrawState::new(),
            renderer,
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx.surface.configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
            self.ctx.projection.resize(width, height);
            self.ctx.camera.update(&self.ctx.queue, &self.ctx.projection);
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        self.draws.clear();
        self.draw_state = self
            .assembly
            .render_from(self.draw_state.clone(), &mut self.uniforms, &mut self.draws);
        self.renderer
            .prepare_frame(&self.ctx.device, &self.ctx.queue, &self.uniforms, &mut self.draws);

        let output = self.ctx.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.renderer.draw(
                &mut render_pass,
                &self.ctx.camera.bind_group,
                self.assembly.textures().backend().bind_group(),
                &self.draws,
            );
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    settings: Settings,
    // Taken once the window exists.
    scene: Option<SceneDescription>,
    state: Option<AppState>,
    last_time: Instant,
    frames: u32,
}

impl App {
    fn new(settings: Settings, scene: SceneDescription) -> anyhow::Result<Self> {
        Ok(Self {
            async_runtime: tokio::runtime::Runtime::new()?,
            settings,
            scene: Some(scene),
            state: None,
            last_time: Instant::now(),
            frames: 0,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(scene) = self.scene.take() else {
            return;
        };

        let window_attributes = Window::default_attributes().with_title(self.settings.title.clone());
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Cannot open a window: {e}");
                event_loop.exit();
                return;
            }
        };

        match self
            .async_runtime
            .block_on(AppState::new(window, &self.settings, scene))
        {
            Ok(mut state) => {
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("App initialization failed. Cannot create the main context: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => match state.render() {
                Ok(()) => {
                    self.frames += 1;
                    let elapsed = self.last_time.elapsed();
                    if elapsed.as_secs() >= 5 {
                        log::debug!("{:.1} fps", self.frames as f32 / elapsed.as_secs_f32());
                        self.frames = 0;
                        self.last_time = Instant::now();
                    }
                }
                // Reconfigure the surface if it's lost or outdated
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = state.ctx.window.inner_size();
                    state.resize(size.width, size.height);
                }
                Err(e) => {
                    log::error!("Unable to render {e}");
                }
            },
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            state.assembly.teardown();
        }
    }
}

/// Opens a window and draws `scene` until the window is closed.
pub fn run(settings: Settings, scene: SceneDescription) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(settings, scene)?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
