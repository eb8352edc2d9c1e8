//! Paint-Callback: übergibt den Frame-Schnappschuss im egui-Render-Pass
//! an den geteilten Karten-Renderer.

use super::Renderer;
use crate::shared::MapScene;
use eframe::wgpu;
use std::sync::{Arc, Mutex};

/// Ein Callback pro Frame; trägt die Szene als eigenen Schnappschuss,
/// weil egui das Zeichnen zeitversetzt ausführt.
pub struct MapPaintCallback {
    renderer: Arc<Mutex<Renderer>>,
    scene: MapScene,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl MapPaintCallback {
    /// Baut den Callback für den aktuellen Frame.
    pub fn new(
        renderer: Arc<Mutex<Renderer>>,
        scene: MapScene,
        device: wgpu::Device,
        queue: wgpu::Queue,
    ) -> Self {
        Self {
            renderer,
            scene,
            device,
            queue,
        }
    }
}

impl eframe::egui_wgpu::CallbackTrait for MapPaintCallback {
    fn prepare(
        &self,
        _device: &wgpu::Device,
        _queue: &wgpu::Queue,
        _screen_descriptor: &eframe::egui_wgpu::ScreenDescriptor,
        _egui_encoder: &mut wgpu::CommandEncoder,
        _callback_resources: &mut eframe::egui_wgpu::CallbackResources,
    ) -> Vec<wgpu::CommandBuffer> {
        Vec::new()
    }

    fn paint<'b>(
        &'b self,
        _info: egui::PaintCallbackInfo,
        render_pass: &mut wgpu::RenderPass<'static>,
        _callback_resources: &'b eframe::egui_wgpu::CallbackResources,
    ) {
        match self.renderer.lock() {
            Ok(mut renderer) => {
                renderer.render_scene(&self.device, &self.queue, render_pass, &self.scene)
            }
            Err(_) => log::error!("Renderer-Mutex vergiftet, Frame übersprungen"),
        }
    }
}
