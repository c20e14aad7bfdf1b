//! End-to-end editor session scenarios.

use raster_core::PixelBuffer;
use raster_ops::{Kernel, OpsError};
use raster_view::{
    ArrowKey, CurveField, CurveHandle, EditorSession, InputEvent, Modifiers, Tool,
};

fn gray(w: u32, h: u32) -> PixelBuffer {
    PixelBuffer::filled(w, h, [128, 128, 128, 255]).unwrap()
}

fn open(image: PixelBuffer) -> EditorSession {
    let mut s = EditorSession::new(200.0, 100.0);
    s.handle(InputEvent::ImageDecoded(image)).unwrap();
    s
}

#[test]
fn test_fit_scale_on_load() {
    let s = open(gray(400, 400));
    // min(200/400, 100/400) = 0.25
    assert_eq!(s.viewport().scale_percent(), 25);
    assert_eq!(s.viewport().pan(), [0.0, 0.0]);
}

#[test]
fn test_pan_clamps_at_content_edge() {
    let mut s = open(gray(1000, 1000));
    s.handle(InputEvent::SetScale(100)).unwrap();

    for _ in 0..100 {
        s.handle(InputEvent::Key {
            key: ArrowKey::Right,
            modifiers: Modifiers::FAST,
        })
        .unwrap();
    }
    assert_eq!(s.viewport().pan()[0], 800.0);

    s.handle(InputEvent::PointerDown { x: 0.0, y: 0.0 }).unwrap();
    s.handle(InputEvent::PointerMove { x: -10_000.0, y: -10_000.0 }).unwrap();
    assert_eq!(s.viewport().pan(), [800.0, 900.0]);
    s.handle(InputEvent::PointerUp).unwrap();
}

#[test]
fn test_tool_gates() {
    let mut s = open(gray(1000, 1000));
    s.handle(InputEvent::SetScale(100)).unwrap();
    s.handle(InputEvent::SelectTool(Tool::ColorPicker)).unwrap();

    // No drag and no keyboard pan with the picker
    assert!(!s.handle(InputEvent::PointerDown { x: 0.0, y: 0.0 }).unwrap());
    assert!(!s.viewport().is_dragging());
    let moved = s
        .handle(InputEvent::Key {
            key: ArrowKey::Down,
            modifiers: Modifiers::NONE,
        })
        .unwrap();
    assert!(!moved);
    assert_eq!(s.viewport().pan(), [0.0, 0.0]);

    // Picker slots fill only with the picker tool
    s.handle(InputEvent::SelectTool(Tool::Pan)).unwrap();
    let click = InputEvent::Click {
        x: 3.0,
        y: 4.0,
        modifiers: Modifiers::NONE,
    };
    assert!(!s.handle(click.clone()).unwrap());
    assert!(s.picks().primary.is_none());

    s.handle(InputEvent::SelectTool(Tool::ColorPicker)).unwrap();
    assert!(s.handle(click).unwrap());
    let picked = s.picks().primary.unwrap();
    assert_eq!((picked.x, picked.y), (3, 4));
    assert_eq!(picked.rgb, [128, 128, 128]);

    s.handle(InputEvent::Click {
        x: 7.0,
        y: 1.0,
        modifiers: Modifiers::SECONDARY,
    })
    .unwrap();
    assert_eq!(s.picks().secondary.map(|p| (p.x, p.y)), Some((7, 1)));
    assert_eq!(s.picks().primary, Some(picked));
}

#[test]
fn test_hover_sample_with_any_tool() {
    let image = PixelBuffer::from_fn(4, 4, |x, y| [x as u8, y as u8, 0, 255]).unwrap();
    let mut s = open(image);
    s.handle(InputEvent::SelectTool(Tool::ColorPicker)).unwrap();
    s.handle(InputEvent::PointerMove { x: -50.0, y: 5000.0 }).unwrap();
    let cursor = s.cursor().unwrap();
    assert_eq!((cursor.x, cursor.y), (0, 3));
    assert_eq!(cursor.rgb, [0, 3, 0]);
}

#[test]
fn test_curve_edit_rejection_keeps_points() {
    let mut s = open(gray(8, 8));
    s.handle(InputEvent::OpenCurves).unwrap();
    let set = |handle, field, value| InputEvent::SetCurvePoint {
        handle,
        field,
        value,
    };

    assert!(s.handle(set(CurveHandle::Exit, CurveField::Input, 128)).unwrap());
    let before = s.curves().unwrap().points();
    assert!(!s.handle(set(CurveHandle::Enter, CurveField::Input, 128)).unwrap());
    assert!(!s.handle(set(CurveHandle::Exit, CurveField::Input, 0)).unwrap());
    assert_eq!(s.curves().unwrap().points(), before);
}

#[test]
fn test_resize_then_curve_scenario() {
    let mut s = open(gray(10, 10));
    s.handle(InputEvent::Resize { width: 5, height: 5 }).unwrap();
    assert_eq!(s.image().unwrap().dimensions(), (5, 5));

    s.handle(InputEvent::OpenCurves).unwrap();
    s.handle(InputEvent::SetCurvePoint {
        handle: CurveHandle::Exit,
        field: CurveField::Input,
        value: 128,
    })
    .unwrap();
    s.handle(InputEvent::ApplyCurves).unwrap();

    let image = s.image().unwrap();
    assert!(image.iter_pixels().all(|p| p == [255, 255, 255, 255]));
    assert!(s.curves().is_none());
    assert_eq!(s.history_len(), 2);
}

#[test]
fn test_undo_restores_previous_buffer() {
    let original = PixelBuffer::from_fn(6, 6, |x, y| [x as u8 * 40, y as u8 * 40, 7, 200]).unwrap();
    let mut s = open(original.clone());
    s.handle(InputEvent::ApplyFilter(Kernel::gaussian(3, 1.0))).unwrap();
    s.handle(InputEvent::Resize { width: 3, height: 2 }).unwrap();
    assert_eq!(s.image().unwrap().dimensions(), (3, 2));

    assert!(s.handle(InputEvent::Undo).unwrap());
    assert_eq!(s.image().unwrap().dimensions(), (6, 6));
    assert!(s.handle(InputEvent::Undo).unwrap());
    assert_eq!(s.image(), Some(&original));
    assert!(!s.handle(InputEvent::Undo).unwrap());
}

#[test]
fn test_zero_resize_is_an_error() {
    let mut s = open(gray(4, 4));
    let err = s
        .handle(InputEvent::Resize { width: 0, height: 4 })
        .unwrap_err();
    assert!(matches!(err, OpsError::InvalidDimensions(_)));
    assert_eq!(s.image().unwrap().dimensions(), (4, 4));
    assert!(!s.can_undo());
}

#[test]
fn test_new_image_resets_session() {
    let mut s = open(gray(4, 4));
    s.handle(InputEvent::Resize { width: 2, height: 2 }).unwrap();
    s.handle(InputEvent::OpenCurves).unwrap();
    s.handle(InputEvent::ImageDecoded(gray(50, 10))).unwrap();
    assert!(!s.can_undo());
    assert!(s.curves().is_none());
    assert_eq!(s.viewport().source(), [50, 10]);
}
