use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use eframe::egui::{self, Align2, ColorImage, FontId, Sense, TextureHandle, TextureOptions};

use super::style;
use crate::map::{self, TileId, TileLoader, TileSource, WorldPoint};
use crate::presenter::MapMarker;

const MAP_HEIGHT: f32 = 360.0;
const ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Slippy map centered on the prediction marker.
pub(super) struct MapView {
    loader: TileLoader,
    textures: HashMap<TileId, TextureHandle>,
    failed: HashSet<TileId>,
    /// Screen-space drag offset from the marker-centered view.
    pan: egui::Vec2,
    focus: Option<(f64, f64)>,
    popup_open: bool,
}

impl MapView {
    pub(super) fn new(source: Arc<dyn TileSource>) -> Self {
        Self {
            loader: TileLoader::new(source),
            textures: HashMap::new(),
            failed: HashSet::new(),
            pan: egui::Vec2::ZERO,
            focus: None,
            popup_open: false,
        }
    }

    /// Upload finished tiles. Returns whether anything arrived.
    pub(super) fn poll_tiles(&mut self, ctx: &egui::Context) -> bool {
        let updates = self.loader.poll();
        let changed = !updates.is_empty();
        for update in updates {
            match update.result {
                Ok(image) => {
                    let size = [image.width() as usize, image.height() as usize];
                    let color = ColorImage::from_rgba_unmultiplied(size, image.as_raw());
                    let name = format!("tile_{}_{}_{}", update.id.zoom, update.id.x, update.id.y);
                    let texture = ctx.load_texture(name, color, TextureOptions::LINEAR);
                    self.textures.insert(update.id, texture);
                }
                Err(_) => {
                    self.failed.insert(update.id);
                }
            }
        }
        changed
    }

    pub(super) fn is_loading(&self) -> bool {
        self.loader.is_busy()
    }

    fn evict_distant_tiles(&mut self, center: WorldPoint, size: egui::Vec2, zoom: u8) {
        let keep = map::retained_tiles(center, f64::from(size.x), f64::from(size.y), zoom);
        self.textures.retain(|id, _| keep.contains(id));
        self.failed.retain(|id| keep.contains(id));
        self.loader.retain(|id| keep.contains(id));
    }

    pub(super) fn show(&mut self, ui: &mut egui::Ui, marker: &MapMarker) {
        let focus = (marker.latitude, marker.longitude);
        if self.focus != Some(focus) {
            self.focus = Some(focus);
            self.pan = egui::Vec2::ZERO;
            self.popup_open = false;
        }

        ui.horizontal(|ui| {
            if ui.button("Recenter").clicked() {
                self.pan = egui::Vec2::ZERO;
            }
            if ui.button("Open in browser").clicked() {
                let url = map::osm_permalink(marker.latitude, marker.longitude, marker.zoom);
                if let Err(err) = open::that(&url) {
                    tracing::warn!("Failed to open {url}: {err}");
                }
            }
        });

        let size = egui::vec2(ui.available_width().max(200.0), MAP_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        if response.dragged() {
            self.pan += response.drag_delta();
        }

        let painter = ui.painter_at(rect);
        let palette = style::palette();
        painter.rect_filled(rect, 0.0, palette.bg_primary);

        let marker_world = map::project(marker.latitude, marker.longitude, marker.zoom);
        let center = WorldPoint {
            x: marker_world.x - f64::from(self.pan.x),
            y: marker_world.y - f64::from(self.pan.y),
        };
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        let tile_size = map::TILE_SIZE as f32;
        for placed in map::visible_tiles(
            center,
            f64::from(rect.width()),
            f64::from(rect.height()),
            marker.zoom,
        ) {
            let min = rect.min + egui::vec2(placed.offset_x as f32, placed.offset_y as f32);
            let tile_rect = egui::Rect::from_min_size(min, egui::vec2(tile_size, tile_size));
            match self.textures.get(&placed.id) {
                Some(texture) => {
                    painter.image(texture.id(), tile_rect, uv, egui::Color32::WHITE);
                }
                None => {
                    painter.rect_filled(tile_rect, 0.0, palette.grid_soft);
                    if !self.failed.contains(&placed.id) {
                        self.loader.request(placed.id);
                    }
                }
            }
        }

        self.evict_distant_tiles(center, rect.size(), marker.zoom);

        let marker_pos = rect.center() + self.pan;
        painter.circle(
            marker_pos,
            marker.radius,
            style::marker_fill(marker.color, marker.fill_opacity),
            style::marker_stroke(marker.color),
        );
        painter.text(
            rect.right_bottom() - egui::vec2(4.0, 4.0),
            Align2::RIGHT_BOTTOM,
            ATTRIBUTION,
            FontId::proportional(10.0),
            palette.text_muted,
        );
        painter.rect_stroke(rect, 0.0, style::outer_border(), egui::StrokeKind::Inside);

        let over_marker = response
            .hover_pos()
            .is_some_and(|pos| pos.distance(marker_pos) <= marker.radius + 2.0);
        if response.clicked() {
            self.popup_open = over_marker && !self.popup_open;
        }
        if over_marker || self.popup_open {
            egui::Tooltip::always_open(
                ui.ctx().clone(),
                ui.layer_id(),
                egui::Id::new("quake_marker_popup"),
                egui::PopupAnchor::Position(marker_pos + egui::vec2(marker.radius, 0.0)),
            )
            .show(|ui| {
                for line in &marker.popup_lines {
                    ui.label(line);
                }
            });
        }
    }
}
