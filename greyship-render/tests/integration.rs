use std::sync::Arc;

use greyship_core::{Complex, ComplexWindow, CoreError, Variant, IN_SET};
use greyship_render::{
    export_png, render_window, ExportMetadata, GreyBuffer, RenderCancel, RenderError,
};

fn julia() -> Variant {
    Variant::Julia {
        c: Complex::new(-0.8, 0.156),
    }
}

#[test]
fn end_to_end_julia_golden() {
    let window = ComplexWindow::new(Complex::ZERO, 4.0, 4, 4).unwrap();
    let cancel = Arc::new(RenderCancel::new());

    let result = render_window(&julia(), &window, 5, &cancel).unwrap();

    assert!(!result.cancelled);
    #[rustfmt::skip]
    let expected = [
        0, 0, 1, 0,
        0, 1, 2, 1,
        1, IN_SET, IN_SET, IN_SET,
        0, 1, 2, 1,
    ];
    assert_eq!(result.counts.data, expected);

    // Julia is written in grid order.
    let grey = GreyBuffer::from_counts(&result.counts, julia().flip_rows());
    assert_eq!(grey.row(0), &[255, 255, 254, 255]);
    assert_eq!(grey.row(2), &[254, 0, 0, 0]);
}

#[test]
fn end_to_end_burning_ship_golden_is_flipped() {
    let window = ComplexWindow::new(Complex::ZERO, 4.0, 4, 4).unwrap();
    let cancel = Arc::new(RenderCancel::new());
    let variant = Variant::BurningShip;

    let result = render_window(&variant, &window, 5, &cancel).unwrap();
    #[rustfmt::skip]
    let expected = [
        0, 0, 1, 0,
        0, 2, 2, 1,
        IN_SET, IN_SET, IN_SET, 2,
        0, IN_SET, IN_SET, 1,
    ];
    assert_eq!(result.counts.data, expected);

    // The top image row is the highest-imaginary grid row.
    let grey = GreyBuffer::from_counts(&result.counts, variant.flip_rows());
    assert_eq!(grey.row(0), &[255, 0, 0, 254]);
    assert_eq!(grey.row(3), &[255, 255, 254, 255]);
}

#[test]
fn larger_render_has_both_classes() {
    let window = ComplexWindow::new(Complex::new(-1.75, -0.03), 0.12, 120, 90).unwrap();
    let cancel = Arc::new(RenderCancel::new());

    let result = render_window(&Variant::BurningShip, &window, 200, &cancel).unwrap();

    assert_eq!(result.counts.data.len(), 120 * 90);
    assert!(result.counts.in_set_count() > 0, "some pixels should stay bounded");
    assert!(result.counts.max_escape_count().is_some(), "some pixels should escape");
    assert_eq!(result.bands_rendered, 90usize.div_ceil(16));
}

#[test]
fn render_determinism() {
    let window = ComplexWindow::default_julia();
    let small = ComplexWindow { width: 128, height: 96, ..window };
    let cancel = Arc::new(RenderCancel::new());

    let r1 = render_window(&julia(), &small, 200, &cancel).unwrap();
    let r2 = render_window(&julia(), &small, 200, &cancel).unwrap();

    assert_eq!(r1.counts, r2.counts, "renders must be deterministic");
}

#[test]
fn invalid_inputs_are_rejected_before_rendering() {
    let cancel = Arc::new(RenderCancel::new());

    let window = ComplexWindow::new(Complex::ZERO, 4.0, 8, 8).unwrap();
    let err = render_window(&julia(), &window, 255, &cancel).unwrap_err();
    assert!(matches!(
        err,
        RenderError::Core(CoreError::InvalidMaxIterations(255))
    ));

    let bad = ComplexWindow {
        real_extent: -1.0,
        ..window
    };
    let err = render_window(&julia(), &bad, 10, &cancel).unwrap_err();
    assert!(matches!(err, RenderError::Core(CoreError::InvalidWindow { .. })));

    let empty = ComplexWindow { width: 0, ..window };
    assert!(render_window(&julia(), &empty, 10, &cancel).is_err());
}

#[test]
fn render_then_export() {
    let window = ComplexWindow::new(Complex::ZERO, 4.0, 32, 32).unwrap();
    let cancel = Arc::new(RenderCancel::new());
    let variant = julia();

    let result = render_window(&variant, &window, 50, &cancel).unwrap();
    let grey = GreyBuffer::from_counts(&result.counts, variant.flip_rows());

    let dir = std::env::temp_dir().join("greyship_test_integration");
    let _ = std::fs::create_dir_all(&dir);
    let path = dir.join("julia.png");
    let meta = ExportMetadata {
        variant,
        window,
        max_iterations: 50,
    };
    export_png(&grey, &path, &meta).expect("export should succeed");
    assert!(std::fs::metadata(&path).unwrap().len() > 0);

    let _ = std::fs::remove_dir_all(&dir);
}
