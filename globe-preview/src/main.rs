use anyhow::Context;
use spinglobe::prelude::*;

/// Standalone globe preview
///
/// Takes an optional listing source: a URL or a path to a JSON feature array.
/// Without one, listings come from `SPINGLOBE_ASSET_ROOT` when it is set,
/// otherwise a handful of built-in listings is shown.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let features = load_listings(std::env::args().nth(1)).await?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Spinglobe Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "globe-preview",
        options,
        Box::new(move |_cc| Box::new(PreviewApp::new(features))),
    )
    .map_err(|e| anyhow::anyhow!("preview window failed: {}", e))?;

    Ok(())
}

async fn load_listings(source: Option<String>) -> anyhow::Result<Vec<Feature>> {
    let features = match source {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            load_features(&HttpSource::new(url)).await
        }
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading listings from {}", path))?;
            let source = StaticSource::from_json(&json)
                .with_context(|| format!("parsing listings in {}", path))?;
            load_features(&source).await
        }
        None => {
            let assets = AssetConfig::from_env();
            if assets.asset_root.is_empty() {
                load_features(&StaticSource::new(sample_listings())).await
            } else {
                load_features(&HttpSource::from_assets(&assets)).await
            }
        }
    };
    Ok(features.unwrap_or_default())
}

fn sample_listings() -> Vec<Feature> {
    vec![
        Feature::new("/listings/banff.jpg", "ca", "$240", "Cabin", -115.57, 51.18),
        Feature::new("/listings/quebec.jpg", "ca", "$160", "Loft", -71.21, 46.81),
        Feature::new("/listings/tulum.jpg", "mx", "$130", "Villa", -87.46, 20.21),
        Feature::new("/listings/cusco.jpg", "pe", "$70", "Casa", -71.97, -13.53),
        Feature::new("/listings/lisbon.jpg", "pt", "€95", "Flat", -9.14, 38.72),
        Feature::new("/listings/tromso.jpg", "no", "kr 1900", "Cabin", 18.96, 69.65),
        Feature::new("/listings/cape-town.jpg", "za", "R 2100", "House", 18.42, -33.92),
        Feature::new("/listings/kyoto.jpg", "jp", "¥18000", "Ryokan", 135.77, 35.01),
        Feature::new("/listings/hobart.jpg", "au", "$210", "Cottage", 147.33, -42.88),
    ]
}

struct PreviewApp {
    globe: Globe<SimulatedCamera, ManualScheduler, MemoryElement>,
    viewport_width: f32,
    dragging: bool,
}

impl PreviewApp {
    fn new(features: Vec<Feature>) -> Self {
        let options = GlobeOptions::default();
        let width = 1200.0;
        let host = SimulatedCamera::from_options(&options.camera, zoom_for_width(width, &options));
        let mut globe = Globe::new(host, ManualScheduler::new(), options);
        globe.place_markers(features, |_, _| Some(MemoryElement::new()));
        globe.start(width);

        Self {
            globe,
            viewport_width: width as f32,
            dragging: false,
        }
    }

    fn status_panel(&self, ui: &mut egui::Ui) {
        let rotation = self.globe.rotation();
        let state = self.globe.host().state();

        ui.heading("Rotation");
        ui.separator();
        ui.label(format!("State: {:?}", rotation.state()));
        ui.label(format!("Steps: {}", rotation.steps()));
        ui.label(format!(
            "Clock: {:.1}s",
            self.globe.scheduler().now().as_secs_f64()
        ));
        ui.label(format!("Step: {:.2}°", rotation.step_degrees()));
        match self.globe.scheduler().next_due_in() {
            Some(due) => ui.label(format!("Resume in {:.1}s", due.as_secs_f64())),
            None => ui.label("Resume: none pending"),
        };

        ui.separator();
        ui.heading("Camera");
        ui.label(format!("Center: {:.2}, {:.2}", state.center.lat, state.center.lng));
        ui.label(format!("Zoom: {:.3}", state.zoom));

        ui.separator();
        ui.heading("Markers");
        let markers = self.globe.styler().markers();
        let visible = markers
            .iter()
            .filter(|m| m.element().opacity.unwrap_or_default() > 0.0)
            .count();
        ui.label(format!("{} placed, {} visible", markers.len(), visible));
    }

    fn handle_drag(&mut self, response: &egui::Response, radius: f32) {
        if response.drag_started() {
            self.dragging = true;
            self.globe
                .host_mut()
                .push_interaction(InteractionSource::PointerDown);
        }
        if self.dragging && response.dragged() {
            let delta = response.drag_delta();
            let degrees_per_px = (1.0 / radius as f64).to_degrees();
            self.globe.host_mut().pan_by(
                -delta.x as f64 * degrees_per_px,
                delta.y as f64 * degrees_per_px,
            );
        }
        if self.dragging && response.drag_released() {
            self.dragging = false;
            self.globe
                .host_mut()
                .push_interaction(InteractionSource::DragEnd);
        }
    }

    fn draw_globe(&self, painter: &egui::Painter, rect: egui::Rect, radius: f32) {
        let center = rect.center();
        painter.circle_filled(center, radius, egui::Color32::from_rgb(24, 48, 82));
        painter.circle_stroke(
            center,
            radius,
            egui::Stroke::new(1.0, egui::Color32::from_rgb(90, 130, 180)),
        );

        let camera = self.globe.host().center();
        let mut markers: Vec<_> = self.globe.styler().markers().iter().collect();
        markers.sort_by_key(|m| m.z_index());

        for marker in markers {
            let element = marker.element();
            let opacity = element.opacity.unwrap_or(1.0);
            if opacity <= 0.0 {
                continue;
            }
            let Some(offset) = project(camera, marker.position()) else {
                continue;
            };
            let pos = center + offset * radius;
            let size = 9.0 * element.scale.unwrap_or(1.0) as f32;
            let blur = element.blur_px.unwrap_or_default() as f32;

            // Blur reads as a faded halo around a shrinking core.
            let alpha = (255.0 * opacity as f32 * (1.0 - blur / 20.0)) as u8;
            painter.circle_filled(
                pos,
                size + blur,
                egui::Color32::from_rgba_unmultiplied(250, 200, 90, alpha / 4),
            );
            painter.circle_filled(
                pos,
                size,
                egui::Color32::from_rgba_unmultiplied(250, 200, 90, alpha),
            );
        }
    }
}

/// Orthographic projection onto the unit disc, `None` on the far side
fn project(camera: LatLng, point: LatLng) -> Option<egui::Vec2> {
    let (lat0, lng0) = (camera.lat.to_radians(), camera.lng.to_radians());
    let (lat, lng) = (point.lat.to_radians(), point.lng.to_radians());
    let dlng = lng - lng0;

    let cos_c = lat0.sin() * lat.sin() + lat0.cos() * lat.cos() * dlng.cos();
    if cos_c < 0.0 {
        return None;
    }
    let x = lat.cos() * dlng.sin();
    let y = lat0.cos() * lat.sin() - lat0.sin() * lat.cos() * dlng.cos();
    Some(egui::vec2(x as f32, -y as f32))
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("status_panel")
            .resizable(false)
            .show(ctx, |ui| self.status_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let size = ui.available_size();
            if (size.x - self.viewport_width).abs() > 1.0 {
                self.viewport_width = size.x;
                self.globe.host_mut().resize(size.x as f64);
            }

            let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());
            let zoom = self.globe.host().state().zoom as f32;
            let radius = size.min_elem() * 0.2 * 2f32.powf((zoom - 2.5) * 0.5);

            self.handle_drag(&response, radius);
            self.draw_globe(&painter, response.rect, radius);
        });

        let dt = ctx.input(|i| i.unstable_dt).min(0.1);
        self.globe.advance(Duration::from_secs_f32(dt));
        ctx.request_repaint();
    }
}
