use photo_sheet::gesture::{DragOrigin, drag_sensitivity, pan_offset};
use photo_sheet::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn start_drag(adj: &ImageAdjustment, pointer: (f32, f32)) -> SlotGesture {
    SlotGesture::default().click(true).press(pointer, adj)
}

#[test]
fn test_half_scale_drag_on_200px_slot() {
    let adj = ImageAdjustment::default().with_scale(0.5);
    let gesture = start_drag(&adj, (50.0, 50.0));

    let moved = gesture
        .drag_to((60.0, 50.0), &adj, (200.0, 200.0), false)
        .unwrap();
    assert!(approx(moved.x, 60.0));
    assert!(approx(moved.y, 50.0));
}

#[test]
fn test_sensitivity_is_inverse_to_scale() {
    let base = drag_sensitivity(200.0, 300.0, 1.0);
    for scale in [0.5, 2.0, 4.0] {
        let s = drag_sensitivity(200.0, 300.0, scale);
        assert!(approx(s * scale, base));
    }
}

#[test]
fn test_rotated_drag_right_decreases_y() {
    let adj = ImageAdjustment::default();
    let gesture = start_drag(&adj, (0.0, 0.0));

    let moved = gesture
        .drag_to((20.0, 0.0), &adj, (300.0, 200.0), true)
        .unwrap();
    assert!(moved.y < adj.y);
    assert!(approx(moved.x, adj.x));

    let moved = gesture
        .drag_to((0.0, 20.0), &adj, (300.0, 200.0), true)
        .unwrap();
    assert!(moved.x > adj.x);
    assert!(approx(moved.y, adj.y));
}

#[test]
fn test_pan_offset_is_unclamped() {
    let origin = DragOrigin {
        pointer_x: 0.0,
        pointer_y: 0.0,
        image_x: 50.0,
        image_y: 50.0,
    };
    let (x, y) = pan_offset(&origin, 1000.0, -1000.0, 0.5, false);
    assert!(approx(x, 550.0));
    assert!(approx(y, -450.0));
}

#[test]
fn test_release_anywhere_ends_drag_and_confirm_ends_edit() {
    let adj = ImageAdjustment::default();
    let gesture = start_drag(&adj, (0.0, 0.0));
    assert!(gesture.is_dragging());

    let gesture = gesture.release();
    assert!(gesture.is_editing());
    assert!(!gesture.is_dragging());

    assert_eq!(gesture.confirm(), SlotGesture::Idle);
}

#[test]
fn test_fit_toggle_while_editing_resets() {
    let adj = ImageAdjustment {
        scale: 3.0,
        x: 10.0,
        y: 90.0,
        fit_mode: FitMode::Cover,
    };
    let toggled = SlotGesture::Editing.toggle_fit(&adj).unwrap();
    assert_eq!(toggled, ImageAdjustment::with_fit_mode(FitMode::Contain));
}
