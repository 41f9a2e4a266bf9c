//! On-screen sheet preview with per-slot pan/zoom editing
//!
//! Slots are painted with the same template and fit calculation the
//! rasterizer uses. The edit highlight and controls are drawn on top and
//! never reach an export.

use eframe::egui;
use egui::{Color32, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2};
use photo_sheet::constants::*;
use photo_sheet::{
    FitMode, ImageAdjustment, ImageId, ImageQueue, MAX_SCALE, MIN_SCALE, SheetData, SheetOptions,
    SlotGesture, SlotGestures, SlotSpec, UploadedImage, place_image, slot_template,
};
use photo_sheet::render::{SheetLabel, TextAnchor, sheet_labels};

use super::SlotTexture;
use crate::ui_components::SliderBuilder;

/// Largest on-screen width of a sheet preview
const MAX_PREVIEW_WIDTH: f32 = 620.0;

const EDIT_HIGHLIGHT: Color32 = Color32::from_rgb(59, 130, 246);

/// Changes requested by the sheet view, applied by the app after drawing
pub enum SheetAction {
    Adjust {
        id: ImageId,
        adjustment: ImageAdjustment,
    },
    Export {
        sheet_id: usize,
    },
}

fn color(rgba: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(rgba[0], rgba[1], rgba[2], rgba[3])
}

pub fn show_sheet(
    ui: &mut egui::Ui,
    sheet: &SheetData,
    queue: &ImageQueue<SlotTexture>,
    gestures: &mut SlotGestures,
    options: &SheetOptions,
    actions: &mut Vec<SheetAction>,
) {
    ui.horizontal(|ui| {
        ui.heading(format!("Sheet {}", sheet.id));
        ui.label(format!("{} photos", sheet.images.len()));
        if ui.button("💾 Export PNG").clicked() {
            actions.push(SheetAction::Export { sheet_id: sheet.id });
        }
    });

    let width = ui.available_width().min(MAX_PREVIEW_WIDTH);
    let px_per_mm = width / SHEET_WIDTH_MM;
    let (page_rect, _) = ui.allocate_exact_size(
        Vec2::new(width, SHEET_HEIGHT_MM * px_per_mm),
        Sense::hover(),
    );

    let painter = ui.painter_at(page_rect);
    painter.rect_filled(page_rect, 0.0, color(options.page_background));
    painter.rect_stroke(
        page_rect,
        0.0,
        Stroke::new(1.0, Color32::from_gray(200)),
        StrokeKind::Outside,
    );

    if options.draw_footer_rule {
        let rule = Rect::from_min_size(
            page_rect.min
                + Vec2::new(
                    (SHEET_WIDTH_MM - FOOTER_RULE_WIDTH_MM) / 2.0,
                    SHEET_HEIGHT_MM - FOOTER_OFFSET_MM - FOOTER_RULE_HEIGHT_MM,
                ) * px_per_mm,
            Vec2::new(FOOTER_RULE_WIDTH_MM, FOOTER_RULE_HEIGHT_MM) * px_per_mm,
        );
        painter.rect_filled(rule, 0.0, color(options.footer_color));
    }

    for label in sheet_labels(sheet.id, options) {
        paint_label(&painter, page_rect.min, px_per_mm, &label);
    }

    for spec in slot_template() {
        let slot_rect = Rect::from_min_size(
            page_rect.min + Vec2::new(spec.rect.x, spec.rect.y) * px_per_mm,
            Vec2::new(spec.rect.width, spec.rect.height) * px_per_mm,
        );
        let image = sheet.slot(spec.index);
        let texture = image
            .and_then(|img| queue.display(&img.id))
            .and_then(|handle| handle.as_ref());

        show_slot(
            ui,
            SlotView {
                sheet_id: sheet.id,
                spec: &spec,
                rect: slot_rect,
                image,
                texture,
                options,
            },
            gestures,
            actions,
        );
    }
}

struct SlotView<'a> {
    sheet_id: usize,
    spec: &'a SlotSpec,
    rect: Rect,
    image: Option<&'a UploadedImage>,
    texture: Option<&'a egui::TextureHandle>,
    options: &'a SheetOptions,
}

fn show_slot(
    ui: &mut egui::Ui,
    slot: SlotView<'_>,
    gestures: &mut SlotGestures,
    actions: &mut Vec<SheetAction>,
) {
    let id = egui::Id::new(("sheet_slot", slot.sheet_id, slot.spec.index));
    let response = ui.interact(slot.rect, id, Sense::click_and_drag());
    let painter = ui.painter_at(slot.rect);

    painter.rect_filled(slot.rect, 0.0, color(slot.options.slot_background));

    let Some(image) = slot.image else {
        painter.text(
            slot.rect.center(),
            egui::Align2::CENTER_CENTER,
            "Empty",
            egui::FontId::proportional(12.0),
            Color32::from_gray(170),
        );
        draw_border(&painter, &slot);
        return;
    };

    if let Some(texture) = slot.texture {
        paint_image(&painter, &slot, image, texture);
    } else {
        painter.text(
            slot.rect.center(),
            egui::Align2::CENTER_CENTER,
            format!("{}\n(unreadable)", image.name),
            egui::FontId::proportional(11.0),
            Color32::from_gray(140),
        );
    }
    draw_border(&painter, &slot);

    let gesture = gestures.entry(&image.id, slot.sheet_id, slot.spec.index);
    let adjustment = image.adjustment;

    if response.clicked() {
        *gesture = gesture.click(true);
    }

    if response.drag_started() {
        let origin = ui.input(|i| i.pointer.press_origin());
        if let Some(pos) = origin.or(response.interact_pointer_pos()) {
            *gesture = gesture.press((pos.x, pos.y), &adjustment);
        }
    }

    if gesture.is_dragging() {
        let pointer = ui.input(|i| i.pointer.latest_pos());
        let moved = pointer.and_then(|pos| {
            gesture.drag_to(
                (pos.x, pos.y),
                &adjustment,
                (slot.rect.width(), slot.rect.height()),
                slot.spec.orientation.is_rotated(),
            )
        });
        if let Some(moved) = moved {
            actions.push(SheetAction::Adjust {
                id: image.id.clone(),
                adjustment: moved,
            });
        }
    }

    if gesture.is_editing() {
        ui.painter().rect_stroke(
            slot.rect,
            0.0,
            Stroke::new(2.0, EDIT_HIGHLIGHT),
            StrokeKind::Outside,
        );
        show_edit_controls(ui, &slot, id, image, gesture, actions);
    } else {
        response.on_hover_text(format!("{}: click to adjust", image.name));
    }
}

/// Paint one printed label, spans laid side by side from the anchored start
fn paint_label(painter: &egui::Painter, origin: Pos2, px_per_mm: f32, label: &SheetLabel) {
    let galleys: Vec<_> = label
        .spans
        .iter()
        .map(|span| {
            let font = egui::FontId::proportional(span.size_mm * px_per_mm);
            (
                painter.layout_no_wrap(span.text.clone(), font, color(span.color)),
                span.size_mm,
            )
        })
        .collect();

    let width: f32 = galleys.iter().map(|(galley, _)| galley.size().x).sum();
    let anchor_x = origin.x + label.x_mm * px_per_mm;
    let mut x = match label.anchor {
        TextAnchor::Start => anchor_x,
        TextAnchor::Middle => anchor_x - width / 2.0,
        TextAnchor::End => anchor_x - width,
    };
    let baseline = origin.y + label.baseline_mm * px_per_mm;

    for (galley, size_mm) in galleys {
        let top = baseline - size_mm * px_per_mm * 0.8;
        let advance = galley.size().x;
        painter.galley(Pos2::new(x, top), galley, Color32::PLACEHOLDER);
        x += advance;
    }
}

fn draw_border(painter: &egui::Painter, slot: &SlotView<'_>) {
    if slot.options.draw_slot_borders {
        painter.rect_stroke(
            slot.rect,
            0.0,
            Stroke::new(1.0, color(slot.options.border_color)),
            StrokeKind::Inside,
        );
    }
}

/// Paint the texture fitted in the slot's working area, clipped to the slot.
///
/// The landscape slot's working area is rotated a quarter turn clockwise:
/// logical `(x, y)` lands at screen `(left + height - y, top + x)`.
fn paint_image(
    painter: &egui::Painter,
    slot: &SlotView<'_>,
    image: &UploadedImage,
    texture: &egui::TextureHandle,
) {
    let rotated = slot.spec.orientation.is_rotated();
    let (area_w, area_h) = if rotated {
        (slot.rect.height(), slot.rect.width())
    } else {
        (slot.rect.width(), slot.rect.height())
    };

    let Some(placed) = place_image(image.width, image.height, area_w, area_h, &image.adjustment)
    else {
        return;
    };

    let origin = slot.rect.min;
    let to_screen = |x: f32, y: f32| -> Pos2 {
        if rotated {
            Pos2::new(origin.x + area_h - y, origin.y + x)
        } else {
            Pos2::new(origin.x + x, origin.y + y)
        }
    };

    let corners = [
        (placed.left(), placed.top(), Pos2::new(0.0, 0.0)),
        (placed.right(), placed.top(), Pos2::new(1.0, 0.0)),
        (placed.right(), placed.bottom(), Pos2::new(1.0, 1.0)),
        (placed.left(), placed.bottom(), Pos2::new(0.0, 1.0)),
    ];

    let mut mesh = egui::Mesh::with_texture(texture.id());
    for (x, y, uv) in corners {
        mesh.vertices.push(egui::epaint::Vertex {
            pos: to_screen(x, y),
            uv,
            color: Color32::WHITE,
        });
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(egui::Shape::mesh(mesh));
}

fn show_edit_controls(
    ui: &mut egui::Ui,
    slot: &SlotView<'_>,
    id: egui::Id,
    image: &UploadedImage,
    gesture: &mut SlotGesture,
    actions: &mut Vec<SheetAction>,
) {
    let adjustment = image.adjustment;

    egui::Area::new(id.with("edit_controls"))
        .order(egui::Order::Foreground)
        .fixed_pos(slot.rect.left_bottom() + Vec2::new(0.0, 4.0))
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    let mut scale = adjustment.scale;
                    let zoomed = SliderBuilder::new(&mut scale, MIN_SCALE..=MAX_SCALE)
                        .text("Zoom")
                        .suffix("×")
                        .clamped()
                        .show(ui);
                    if zoomed {
                        if let Some(adjusted) = gesture.zoom(&adjustment, scale) {
                            actions.push(SheetAction::Adjust {
                                id: image.id.clone(),
                                adjustment: adjusted,
                            });
                        }
                    }

                    let fit_label = match adjustment.fit_mode {
                        FitMode::Cover => "Fit",
                        FitMode::Contain => "Fill",
                    };
                    if ui.button(fit_label).clicked() {
                        if let Some(adjusted) = gesture.toggle_fit(&adjustment) {
                            actions.push(SheetAction::Adjust {
                                id: image.id.clone(),
                                adjustment: adjusted,
                            });
                        }
                    }

                    if ui.button("✔ Confirm").clicked() {
                        *gesture = gesture.confirm();
                    }
                });
            });
        });
}
