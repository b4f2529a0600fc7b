use crate::capture_pipeline::common::error::{CaptureError, Result};
use crate::capture_pipeline::conversions::{CapturePipeline, ViewOptions};
use crate::capture_pipeline::png::{CaptureConfig, ImageSink, PngCompression};
use crate::capture_pipeline::source::{ChannelField, MemorySource, PixelLayout};

struct MockSink {
    fail_on_row: Option<u32>,
    headers: Vec<(u32, u32)>,
    rows: Vec<Vec<u8>>,
    finish_calls: usize,
}

impl MockSink {
    fn new() -> Self {
        Self {
            fail_on_row: None,
            headers: Vec::new(),
            rows: Vec::new(),
            finish_calls: 0,
        }
    }

    fn failing_on_row(row: u32) -> Self {
        Self {
            fail_on_row: Some(row),
            ..Self::new()
        }
    }
}

impl ImageSink for MockSink {
    fn begin_image(&mut self, width: u32, height: u32) -> Result<()> {
        self.headers.push((width, height));
        Ok(())
    }

    fn write_row(&mut self, row: &[u8]) -> Result<()> {
        if self.fail_on_row == Some(self.rows.len() as u32) {
            return Err(CaptureError::EncodeError("mock write error".to_string()));
        }
        self.rows.push(row.to_vec());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finish_calls += 1;
        Ok(())
    }
}

fn xrgb8888_layout(row_stride: usize) -> PixelLayout {
    PixelLayout::new(
        32,
        row_stride,
        ChannelField::new(8, 16),
        ChannelField::new(8, 8),
        ChannelField::new(8, 0),
    )
    .unwrap()
}

/// Builds a 32-bpp source whose pixel words pack the given RGB triples
/// directly, row-major, with no row padding.
fn xrgb8888_source(width: u32, height: u32, pixels: &[(u8, u8, u8)]) -> MemorySource {
    assert_eq!(pixels.len(), (width * height) as usize);
    let mut region = Vec::with_capacity(pixels.len() * 4);
    for &(r, g, b) in pixels {
        region.extend_from_slice(&[b, g, r, 0]);
    }
    MemorySource::new(region, xrgb8888_layout(width as usize * 4), width, height)
}

fn pipeline() -> CapturePipeline {
    CapturePipeline::new(CaptureConfig::default())
}

#[test]
fn full_capture_reproduces_literal_pixel_bytes() {
    // 2x2, 8-byte rows: output bytes must equal the packed source triples.
    let source = xrgb8888_source(
        2,
        2,
        &[(10, 20, 30), (40, 50, 60), (70, 80, 90), (100, 110, 120)],
    );
    let mut sink = MockSink::new();

    pipeline()
        .capture(&source, &ViewOptions::default(), &mut sink)
        .unwrap();

    assert_eq!(sink.headers, vec![(2, 2)]);
    assert_eq!(sink.rows.len(), 2);
    assert_eq!(sink.rows[0], vec![10, 20, 30, 40, 50, 60]);
    assert_eq!(sink.rows[1], vec![70, 80, 90, 100, 110, 120]);
    assert_eq!(sink.finish_calls, 1);
}

#[test]
fn decimation_by_two_keeps_only_the_top_left_pixel() {
    let source = xrgb8888_source(
        2,
        2,
        &[(10, 20, 30), (40, 50, 60), (70, 80, 90), (100, 110, 120)],
    );
    let options = ViewOptions {
        x_skip: 1,
        y_skip: 1,
        ..Default::default()
    };
    let mut sink = MockSink::new();

    pipeline().capture(&source, &options, &mut sink).unwrap();

    assert_eq!(sink.headers, vec![(1, 1)]);
    assert_eq!(sink.rows, vec![vec![10, 20, 30]]);
}

#[test]
fn decimated_columns_read_every_second_source_pixel() {
    let source = xrgb8888_source(
        4,
        1,
        &[(1, 1, 1), (2, 2, 2), (3, 3, 3), (4, 4, 4)],
    );
    let options = ViewOptions {
        x_skip: 1,
        ..Default::default()
    };
    let mut sink = MockSink::new();

    pipeline().capture(&source, &options, &mut sink).unwrap();

    assert_eq!(sink.headers, vec![(2, 1)]);
    assert_eq!(sink.rows[0], vec![1, 1, 1, 3, 3, 3]);
}

#[test]
fn origin_offset_selects_the_subregion() {
    let source = xrgb8888_source(
        2,
        2,
        &[(10, 20, 30), (40, 50, 60), (70, 80, 90), (100, 110, 120)],
    );
    let options = ViewOptions {
        offset_x: 1,
        offset_y: 1,
        width: Some(1),
        height: Some(1),
        ..Default::default()
    };
    let mut sink = MockSink::new();

    pipeline().capture(&source, &options, &mut sink).unwrap();

    assert_eq!(sink.headers, vec![(1, 1)]);
    assert_eq!(sink.rows, vec![vec![100, 110, 120]]);
}

#[test]
fn rgb565_channels_normalize_to_full_byte_range() {
    // Two pixels: pure red (R=31) and pure green (G=63).
    let layout = PixelLayout::new(
        16,
        4,
        ChannelField::new(5, 11),
        ChannelField::new(6, 5),
        ChannelField::new(5, 0),
    )
    .unwrap();
    let region = vec![0x00, 0xF8, 0xE0, 0x07];
    let source = MemorySource::new(region, layout, 2, 1);
    let mut sink = MockSink::new();

    pipeline()
        .capture(&source, &ViewOptions::default(), &mut sink)
        .unwrap();

    assert_eq!(sink.rows[0], vec![255, 0, 0, 0, 255, 0]);
}

#[test]
fn sink_failure_stops_at_the_failing_row() {
    let pixels = vec![(9u8, 9u8, 9u8); 10];
    let source = xrgb8888_source(1, 10, &pixels);
    let mut sink = MockSink::failing_on_row(2);

    let result = pipeline().capture(&source, &ViewOptions::default(), &mut sink);

    match result.unwrap_err() {
        CaptureError::RowWriteError { row, .. } => assert_eq!(row, 2),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(sink.rows.len(), 2);
    assert_eq!(sink.finish_calls, 0);
}

#[test]
fn out_of_range_region_never_touches_the_sink() {
    let source = xrgb8888_source(2, 2, &[(0, 0, 0); 4]);
    let options = ViewOptions {
        offset_x: 2,
        width: Some(1),
        ..Default::default()
    };
    let mut sink = MockSink::new();

    let result = pipeline().capture(&source, &options, &mut sink);

    assert!(matches!(
        result.unwrap_err(),
        CaptureError::RegionOutOfBounds { .. }
    ));
    assert!(sink.headers.is_empty());
    assert!(sink.rows.is_empty());
}

#[test]
fn degenerate_width_is_handed_to_the_sink_as_is() {
    let source = xrgb8888_source(2, 2, &[(0, 0, 0); 4]);
    let options = ViewOptions {
        x_skip: 3,
        ..Default::default()
    };
    let mut sink = MockSink::new();

    pipeline().capture(&source, &options, &mut sink).unwrap();

    assert_eq!(sink.headers, vec![(0, 2)]);
    assert_eq!(sink.rows, vec![Vec::<u8>::new(), Vec::new()]);
    assert_eq!(sink.finish_calls, 1);
}

#[test]
fn capture_to_file_writes_a_decodable_png() {
    let source = xrgb8888_source(
        2,
        2,
        &[(10, 20, 30), (40, 50, 60), (70, 80, 90), (100, 110, 120)],
    );
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.png");

    let pipeline = CapturePipeline::new(
        CaptureConfig::builder()
            .compression(PngCompression::Fast)
            .build(),
    );
    pipeline
        .capture_to_file(&source, &ViewOptions::default(), &path)
        .unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let decoder = png::Decoder::new(file);
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();

    assert_eq!(info.width, 2);
    assert_eq!(info.height, 2);
    assert_eq!(info.color_type, png::ColorType::Rgb);
    assert_eq!(
        &buf[..info.buffer_size()],
        &[10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120]
    );
}

#[test]
fn capture_to_file_reports_uncreatable_output() {
    let source = xrgb8888_source(1, 1, &[(1, 2, 3)]);
    let result = pipeline().capture_to_file(
        &source,
        &ViewOptions::default(),
        "/nonexistent-dir/out.png",
    );
    assert!(matches!(
        result.unwrap_err(),
        CaptureError::OutputWriteError(_)
    ));
}
