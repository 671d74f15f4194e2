use super::*;

#[test]
fn test_known_checksums() {
    for (size, expected) in KNOWN_CHECKSUMS {
        let bench = MandelbrotBenchmark::new(size).unwrap();
        let sum = bench.run().unwrap();
        assert_eq!(sum, expected, "size {size}");
        assert!(bench.verify(&sum).unwrap());
    }
}

#[test]
fn test_small_grids() {
    assert_eq!(checksum(1), 128);
    assert_eq!(checksum(2), 192);
    assert_eq!(checksum(3), 224);
    assert_eq!(checksum(8), 253);
}

#[test]
fn test_idempotent() {
    let bench = MandelbrotBenchmark::new(500).unwrap();
    let first = bench.run().unwrap();
    let second = bench.run().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_mismatch_is_false() {
    let bench = MandelbrotBenchmark::new(1).unwrap();
    assert!(!bench.verify(&127).unwrap());
}

#[test]
fn test_unknown_size_is_configuration_error() {
    assert!(matches!(
        MandelbrotBenchmark::new(42),
        Err(BenchError::Configuration(_))
    ));

    let bench = MandelbrotBenchmark::unchecked(42);
    let sum = bench.run().unwrap();
    assert!(matches!(
        bench.verify(&sum),
        Err(BenchError::Configuration(_))
    ));
}

#[test]
fn test_origin_does_not_escape() {
    assert!(!escapes(0.0, 0.0));
    assert!(!escapes(-1.0, 0.0));
    assert!(escapes(1.0, 1.0));
    // |c|² = 4 only escapes on a later iteration, not at the boundary itself
    assert!(escapes(2.0, 0.0));
}

#[test]
fn test_full_byte_flush() {
    let mut raster = RasterChecksum::new();
    for _ in 0..8 {
        raster.push_pixel(true, false);
        assert!(raster.pending_bits() < 8);
    }
    assert_eq!(raster.sum(), 0xFF);
    assert_eq!(raster.pending_bits(), 0);
}

#[test]
fn test_row_end_pads_partial_byte() {
    let mut raster = RasterChecksum::new();
    raster.push_pixel(true, false);
    raster.push_pixel(false, false);
    raster.push_pixel(true, true);
    // 101 left-padded to 1010_0000
    assert_eq!(raster.sum(), 0b1010_0000);
    assert_eq!(raster.pending_bits(), 0);
}

#[test]
fn test_row_end_after_full_byte_adds_nothing() {
    let mut raster = RasterChecksum::new();
    for i in 0..8 {
        raster.push_pixel(true, i == 7);
    }
    assert_eq!(raster.sum(), 0xFF);
}
