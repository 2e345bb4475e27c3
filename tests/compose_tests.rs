// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the strip composition pipeline

use base64::Engine as _;
use photobooth::capture::CapturedPhoto;
use photobooth::compose::{Composer, RenderOptions, Template};
use photobooth::errors::ComposeError;
use std::time::Duration;

/// Encode a solid-color PNG as a captured photo
fn photo(index: usize, color: [u8; 4], width: u32, height: u32) -> CapturedPhoto {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(color));
    let mut data = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut data),
        image::ImageFormat::Png,
    )
    .unwrap();
    CapturedPhoto {
        index,
        data,
        width,
        height,
    }
}

fn photos(count: usize) -> Vec<CapturedPhoto> {
    (0..count)
        .map(|i| photo(i, [(i * 60) as u8, 120, 200, 255], 320, 240))
        .collect()
}

#[tokio::test]
async fn compose_returns_fixed_dimensions_for_every_template() {
    let composer = Composer::new(RenderOptions::default());

    for template in Template::ALL {
        let strip = composer.compose(&photos(4), template).await.unwrap();
        assert_eq!(strip.width, 1080);
        assert_eq!(strip.height, 1920);

        // The PNG really decodes back to the declared size
        let decoded = image::load_from_memory(&strip.data).unwrap();
        assert_eq!(decoded.width(), 1080, "{template}");
        assert_eq!(decoded.height(), 1920, "{template}");
    }
}

#[tokio::test]
async fn compose_accepts_any_photo_count_up_to_the_bound() {
    let composer = Composer::new(RenderOptions::default());
    for count in 1..=4 {
        let strip = composer
            .compose(&photos(count), Template::Classic)
            .await
            .unwrap();
        assert_eq!(strip.width, 1080);
    }
}

#[tokio::test]
async fn undecodable_photo_degrades_instead_of_failing() {
    let composer = Composer::new(RenderOptions::default());

    let mut batch = photos(4);
    batch[1].data = b"definitely not an image".to_vec();

    let strip = composer.compose(&batch, Template::Grid).await.unwrap();
    let decoded = image::load_from_memory(&strip.data).unwrap();
    assert_eq!(decoded.width(), 1080);
    assert_eq!(decoded.height(), 1920);
}

#[tokio::test]
async fn empty_photo_list_is_rejected() {
    let composer = Composer::new(RenderOptions::default());
    let err = composer
        .compose(&[], Template::Classic)
        .await
        .expect_err("empty input must not produce a strip");
    assert!(matches!(err, ComposeError::NoPhotos));
}

#[tokio::test]
async fn exhausted_time_budget_rejects_the_whole_compose() {
    let composer = Composer::new(RenderOptions::default()).with_timeout(Duration::ZERO);
    let err = composer
        .compose(&photos(2), Template::Classic)
        .await
        .expect_err("zero budget must time out");
    assert!(matches!(err, ComposeError::Timeout));
}

#[tokio::test]
async fn data_url_photos_are_decoded() {
    let composer = Composer::new(RenderOptions::default());

    let plain = photo(0, [10, 200, 40, 255], 64, 64);
    let url = format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&plain.data)
    );
    let batch = vec![CapturedPhoto {
        index: 0,
        data: url.into_bytes(),
        width: 64,
        height: 64,
    }];

    let strip = composer.compose(&batch, Template::Polaroid).await.unwrap();
    assert_eq!(strip.width, 1080);
}

#[tokio::test]
async fn extra_photos_beyond_the_template_bound_are_dropped() {
    let composer = Composer::new(RenderOptions::default());
    let strip = composer.compose(&photos(6), Template::Grid).await.unwrap();
    assert_eq!(strip.width, 1080);
}

#[tokio::test]
async fn decorations_change_the_output() {
    let mut options = RenderOptions::default();
    // Pin the timestamp so the two renders differ only in decoration
    options.confetti = false;
    options.vignette = false;
    let plain = Composer::new(options.clone())
        .compose(&photos(2), Template::Classic)
        .await
        .unwrap();

    options.confetti = true;
    options.vignette = true;
    let decorated = Composer::new(options)
        .compose(&photos(2), Template::Classic)
        .await
        .unwrap();

    assert_ne!(plain.data, decorated.data);
}
