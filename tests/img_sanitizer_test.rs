mod common;

use amp_sanitizer::{
    Diagnostic, FetchError, ImgSanitizer, MissingDimension, SanitizeError, SanitizerConfig,
    StubFetcher,
};
use common::{attributes_of, gif_bytes, png_bytes, single, stub_extractor};
use std::sync::Arc;

fn not_found(url: &str) -> FetchError {
    FetchError::Status {
        url: url.to_string(),
        status: 404,
    }
}

#[tokio::test]
async fn test_unresolvable_image_gets_default_size() {
    let url = "https://example.com/a.png";
    let config = SanitizerConfig::default();
    let stub = Arc::new(StubFetcher::new().with_error(url, not_found(url)));
    let extractor = stub_extractor(&stub, &config);

    let (html, report) = ImgSanitizer::new(&config, &extractor)
        .sanitize_html(r#"<img src="https://example.com/a.png">"#)
        .await
        .expect("Sanitize failed");

    let amp_img = single(&html, "amp-img");
    assert_eq!(amp_img.get("src"), Some(url));
    assert_eq!(amp_img.get("width"), Some("600"));
    assert_eq!(amp_img.get("height"), Some("400"));
    assert_eq!(amp_img.get("layout"), Some("intrinsic"));
    assert_eq!(
        amp_img.get("class"),
        Some("amp-wp-unknown-size amp-wp-enforced-sizes")
    );
    assert_eq!(amp_img.len(), 5);
    assert!(!html.contains("<img"));

    assert_eq!(report.converted, 1);
    assert_eq!(report.unresolved(), 1);
    assert_eq!(report.probed_urls, vec![url.to_string()]);
    assert_eq!(
        report.diagnostics,
        vec![Diagnostic::UnresolvedDimension {
            url: url.to_string(),
            missing: MissingDimension::Both,
        }]
    );
    assert!(report.scripts.is_empty());
}

#[tokio::test]
async fn test_gif_with_dimensions_becomes_amp_anim_without_fetch() {
    let config = SanitizerConfig::default();
    // Any fetch would hit an unmapped URL and fail the pass
    let stub = Arc::new(StubFetcher::new());
    let extractor = stub_extractor(&stub, &config);

    let (html, report) = ImgSanitizer::new(&config, &extractor)
        .sanitize_html(r#"<img src="https://example.com/b.gif" width="100" height="50">"#)
        .await
        .expect("Sanitize failed");

    let anim = single(&html, "amp-anim");
    assert_eq!(anim.get("width"), Some("100"));
    assert_eq!(anim.get("height"), Some("50"));
    assert_eq!(anim.get("layout"), Some("intrinsic"));
    assert_eq!(anim.get("class"), Some("amp-wp-enforced-sizes"));
    assert!(attributes_of(&html, "amp-img").is_empty());

    assert_eq!(stub.total_requests(), 0);
    assert!(report.probed_urls.is_empty());
    assert_eq!(
        report.scripts.get("amp-anim").map(String::as_str),
        Some("https://cdn.ampproject.org/v0/amp-anim-0.1.js")
    );
}

#[tokio::test]
async fn test_height_only_becomes_fixed_height() {
    let url = "https://example.com/c.png";
    let config = SanitizerConfig::default();
    let stub = Arc::new(StubFetcher::new().with_error(url, not_found(url)));
    let extractor = stub_extractor(&stub, &config);

    let (html, report) = ImgSanitizer::new(&config, &extractor)
        .sanitize_html(r#"<img src="https://example.com/c.png" height="300">"#)
        .await
        .expect("Sanitize failed");

    let amp_img = single(&html, "amp-img");
    assert_eq!(amp_img.get("width"), Some("auto"));
    assert_eq!(amp_img.get("height"), Some("300"));
    assert_eq!(amp_img.get("layout"), Some("fixed-height"));
    assert_eq!(
        amp_img.get("class"),
        Some("amp-wp-unknown-width amp-wp-enforced-sizes")
    );
    assert_eq!(
        report.diagnostics,
        vec![Diagnostic::UnresolvedDimension {
            url: url.to_string(),
            missing: MissingDimension::Width,
        }]
    );
}

#[tokio::test]
async fn test_width_only_gets_fallback_height() {
    let url = "https://example.com/w.png";
    let config = SanitizerConfig::default();
    let stub = Arc::new(StubFetcher::new().with_error(url, not_found(url)));
    let extractor = stub_extractor(&stub, &config);

    let (html, _) = ImgSanitizer::new(&config, &extractor)
        .sanitize_html(r#"<img src="https://example.com/w.png" width="250px" class="hero">"#)
        .await
        .expect("Sanitize failed");

    let amp_img = single(&html, "amp-img");
    assert_eq!(amp_img.get("width"), Some("250"));
    assert_eq!(amp_img.get("height"), Some("400"));
    assert_eq!(amp_img.get("layout"), Some("intrinsic"));
    assert_eq!(
        amp_img.get("class"),
        Some("amp-wp-unknown-height hero amp-wp-enforced-sizes")
    );
}

#[tokio::test]
async fn test_probed_dimensions_applied_and_deduplicated() {
    let url = "https://example.com/d.png";
    let config = SanitizerConfig::default();
    let stub = Arc::new(StubFetcher::new().with_bytes(url, png_bytes(120, 80)));
    let extractor = stub_extractor(&stub, &config);

    let input = r#"<img src="https://example.com/d.png" alt="one">
<img src="https://example.com/d.png" alt="two">
<img src="https://example.com/d.png" width="50" alt="three">"#;

    let (html, report) = ImgSanitizer::new(&config, &extractor)
        .sanitize_html(input)
        .await
        .expect("Sanitize failed");

    assert_eq!(stub.request_count(url), 1);
    assert_eq!(report.converted, 3);
    assert_eq!(report.unresolved(), 0);

    let images = attributes_of(&html, "amp-img");
    assert_eq!(images.len(), 3);
    for (image, alt) in images.iter().zip(["one", "two", "three"]) {
        assert_eq!(image.get("alt"), Some(alt));
        assert_eq!(image.get("width"), Some("120"));
        assert_eq!(image.get("height"), Some("80"));
        assert_eq!(image.get("layout"), Some("intrinsic"));
        assert_eq!(image.get("class"), Some("amp-wp-enforced-sizes"));
    }
}

#[tokio::test]
async fn test_probed_gif_without_dimensions() {
    let url = "https://example.com/loop.GIF?v=2";
    let config = SanitizerConfig::default();
    let stub = Arc::new(StubFetcher::new().with_bytes(url, gif_bytes(32, 16)));
    let extractor = stub_extractor(&stub, &config);

    let (html, report) = ImgSanitizer::new(&config, &extractor)
        .sanitize_html(r#"<img src="https://example.com/loop.GIF?v=2">"#)
        .await
        .expect("Sanitize failed");

    let anim = single(&html, "amp-anim");
    assert_eq!(anim.get("width"), Some("32"));
    assert_eq!(anim.get("height"), Some("16"));
    assert!(report.scripts.contains_key("amp-anim"));
}

#[tokio::test]
async fn test_img_without_src_removed() {
    let config = SanitizerConfig::default();
    let stub = Arc::new(StubFetcher::new());
    let extractor = stub_extractor(&stub, &config);

    let (html, report) = ImgSanitizer::new(&config, &extractor)
        .sanitize_html(r#"<p>x</p><img alt="no src"><img src="  "><p>y</p>"#)
        .await
        .expect("Sanitize failed");

    assert_eq!(html, "<p>x</p><p>y</p>");
    assert_eq!(report.removed, 2);
    assert_eq!(report.converted, 0);
    assert_eq!(report.diagnostics.len(), 2);
    assert!(
        report
            .diagnostics
            .iter()
            .all(|d| matches!(d, Diagnostic::InvalidNode { .. }))
    );
}

#[tokio::test]
async fn test_document_order_and_siblings_preserved() {
    let config = SanitizerConfig::default();
    let stub = Arc::new(StubFetcher::new());
    let extractor = stub_extractor(&stub, &config);

    let input = r#"<p>first</p><img src="https://example.com/1.png" width="10" height="10"><p>middle</p><img src="https://example.com/2.png" width="20" height="20"><p>last</p>"#;
    let (html, _) = ImgSanitizer::new(&config, &extractor)
        .sanitize_html(input)
        .await
        .expect("Sanitize failed");

    let first = html.find("<p>first</p>").expect("first paragraph");
    let one = html.find("1.png").expect("first image");
    let middle = html.find("<p>middle</p>").expect("middle paragraph");
    let two = html.find("2.png").expect("second image");
    let last = html.find("<p>last</p>").expect("last paragraph");
    assert!(first < one && one < middle && middle < two && two < last);
}

#[tokio::test]
async fn test_second_pass_is_a_no_op() {
    let url = "https://example.com/a.png";
    let config = SanitizerConfig::default();
    let stub = Arc::new(StubFetcher::new().with_error(url, not_found(url)));
    let extractor = stub_extractor(&stub, &config);
    let sanitizer = ImgSanitizer::new(&config, &extractor);

    let (first, _) = sanitizer
        .sanitize_html(r#"<p><img src="https://example.com/a.png" alt="a"></p>"#)
        .await
        .expect("First pass failed");
    let (second, report) = sanitizer
        .sanitize_html(&first)
        .await
        .expect("Second pass failed");

    assert_eq!(first, second);
    assert_eq!(report.converted, 0);
    assert!(report.probed_urls.is_empty());
    assert_eq!(stub.request_count(url), 1);
}

#[tokio::test]
async fn test_unmapped_stub_url_halts_pass() {
    let config = SanitizerConfig::default();
    let stub = Arc::new(StubFetcher::new());
    let extractor = stub_extractor(&stub, &config);

    let err = ImgSanitizer::new(&config, &extractor)
        .sanitize_html(r#"<img src="https://example.com/unmapped.png">"#)
        .await
        .expect_err("Unmapped URL must fail the pass");

    match err {
        SanitizeError::Fetcher { url, .. } => assert_eq!(url, "https://example.com/unmapped.png"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_fetch_failure_isolated_to_its_url() {
    let good = "https://example.com/good.png";
    let bad = "https://example.com/bad.png";
    let config = SanitizerConfig::default();
    let stub = Arc::new(
        StubFetcher::new()
            .with_bytes(good, png_bytes(64, 48))
            .with_error(
                bad,
                FetchError::Request {
                    url: bad.to_string(),
                    message: "connection reset".to_string(),
                },
            ),
    );
    let extractor = stub_extractor(&stub, &config);

    let input = r#"<img src="https://example.com/bad.png"><img src="https://example.com/good.png">"#;
    let (html, report) = ImgSanitizer::new(&config, &extractor)
        .sanitize_html(input)
        .await
        .expect("Sanitize failed");

    let images = attributes_of(&html, "amp-img");
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].get("width"), Some("600"));
    assert_eq!(images[1].get("width"), Some("64"));
    assert_eq!(images[1].get("height"), Some("48"));
    assert_eq!(report.unresolved(), 1);
}

#[tokio::test]
async fn test_filename_hint_skips_fetch() {
    let config = SanitizerConfig::default();
    let stub = Arc::new(StubFetcher::new());
    let extractor = stub_extractor(&stub, &config);

    let (html, _) = ImgSanitizer::new(&config, &extractor)
        .sanitize_html(r#"<img src="https://example.com/uploads/photo-300x200.jpg">"#)
        .await
        .expect("Sanitize failed");

    let amp_img = single(&html, "amp-img");
    assert_eq!(amp_img.get("width"), Some("300"));
    assert_eq!(amp_img.get("height"), Some("200"));
    assert_eq!(stub.total_requests(), 0);
}

#[tokio::test]
async fn test_relative_src_resolved_against_base_url() {
    let config = SanitizerConfig::builder()
        .base_url("https://example.com/blog/")
        .build()
        .expect("Invalid config");
    let stub = Arc::new(
        StubFetcher::new().with_bytes("https://example.com/uploads/r.png", png_bytes(90, 30)),
    );
    let extractor = stub_extractor(&stub, &config);

    let (html, _) = ImgSanitizer::new(&config, &extractor)
        .sanitize_html(r#"<img src="/uploads/r.png">"#)
        .await
        .expect("Sanitize failed");

    let amp_img = single(&html, "amp-img");
    assert_eq!(amp_img.get("src"), Some("/uploads/r.png"));
    assert_eq!(amp_img.get("width"), Some("90"));
    assert_eq!(amp_img.get("height"), Some("30"));
}

#[tokio::test]
async fn test_relative_src_without_base_url_falls_back() {
    let config = SanitizerConfig::default();
    let stub = Arc::new(StubFetcher::new());
    let extractor = stub_extractor(&stub, &config);

    let (html, report) = ImgSanitizer::new(&config, &extractor)
        .sanitize_html(r#"<img src="/uploads/r.png">"#)
        .await
        .expect("Sanitize failed");

    assert_eq!(stub.total_requests(), 0);
    assert_eq!(single(&html, "amp-img").get("width"), Some("600"));
    assert_eq!(report.unresolved(), 1);
}

#[tokio::test]
async fn test_content_max_width_drives_unknown_and_percent_widths() {
    let url = "https://example.com/a.png";
    let config = SanitizerConfig::builder()
        .content_max_width(Some(800))
        .build()
        .expect("Invalid config");
    let stub = Arc::new(StubFetcher::new().with_error(url, not_found(url)));
    let extractor = stub_extractor(&stub, &config);

    let input = r#"<img src="https://example.com/a.png"><img src="https://example.com/p.png" width="50%" height="100">"#;
    let (html, _) = ImgSanitizer::new(&config, &extractor)
        .sanitize_html(input)
        .await
        .expect("Sanitize failed");

    let images = attributes_of(&html, "amp-img");
    assert_eq!(images[0].get("width"), Some("800"));
    assert_eq!(images[0].get("height"), Some("400"));
    assert_eq!(images[1].get("width"), Some("400"));
    assert_eq!(images[1].get("height"), Some("100"));
    assert_eq!(stub.request_count("https://example.com/p.png"), 0);
}

#[tokio::test]
async fn test_unlisted_attributes_dropped_and_layout_hint_kept() {
    let config = SanitizerConfig::default();
    let stub = Arc::new(StubFetcher::new());
    let extractor = stub_extractor(&stub, &config);

    let input = r#"<img src="https://example.com/a.png" width="40" height="30" style="border:0" onclick="x()" loading="lazy" data-amp-layout="responsive" srcset="a.png 1x">"#;
    let (html, _) = ImgSanitizer::new(&config, &extractor)
        .sanitize_html(input)
        .await
        .expect("Sanitize failed");

    let amp_img = single(&html, "amp-img");
    assert_eq!(amp_img.get("layout"), Some("responsive"));
    assert_eq!(amp_img.get("srcset"), Some("a.png 1x"));
    for dropped in ["style", "onclick", "loading", "data-amp-layout"] {
        assert!(!amp_img.contains(dropped), "{dropped} should be dropped");
    }
}

#[tokio::test]
async fn test_cache_shared_across_passes() {
    let url = "https://example.com/cached.png";
    let config = SanitizerConfig::default();
    let stub = Arc::new(StubFetcher::new().with_bytes(url, png_bytes(5, 7)));
    let extractor = stub_extractor(&stub, &config);
    let sanitizer = ImgSanitizer::new(&config, &extractor);

    for _ in 0..2 {
        let (html, _) = sanitizer
            .sanitize_html(r#"<img src="https://example.com/cached.png">"#)
            .await
            .expect("Sanitize failed");
        assert_eq!(single(&html, "amp-img").get("width"), Some("5"));
    }

    assert_eq!(stub.request_count(url), 1);
    assert_eq!(extractor.cached_len(), 1);
}

#[tokio::test]
async fn test_unresolved_lookup_remembered_across_passes() {
    let url = "https://example.com/missing.png";
    let config = SanitizerConfig::default();
    let stub = Arc::new(StubFetcher::new().with_error(url, not_found(url)));
    let extractor = stub_extractor(&stub, &config);
    let sanitizer = ImgSanitizer::new(&config, &extractor);

    for _ in 0..2 {
        let (html, report) = sanitizer
            .sanitize_html(r#"<img src="https://example.com/missing.png">"#)
            .await
            .expect("Sanitize failed");
        let amp_img = single(&html, "amp-img");
        assert_eq!(amp_img.get("width"), Some("600"));
        assert_eq!(amp_img.get("height"), Some("400"));
        assert_eq!(report.unresolved(), 1);
    }

    assert_eq!(stub.request_count(url), 1);
    assert_eq!(extractor.cached_len(), 1);
}

#[tokio::test]
async fn test_duplicate_unresolvable_urls_share_one_fetch() {
    let url = "https://example.com/gone.png";
    let config = SanitizerConfig::default();
    let stub = Arc::new(StubFetcher::new().with_error(url, not_found(url)));
    let extractor = stub_extractor(&stub, &config);

    let input = r#"<img src="https://example.com/gone.png" alt="a"><img src="https://example.com/gone.png" alt="b"><img src="https://example.com/gone.png" alt="c">"#;
    let (html, report) = ImgSanitizer::new(&config, &extractor)
        .sanitize_html(input)
        .await
        .expect("Sanitize failed");

    let images = attributes_of(&html, "amp-img");
    assert_eq!(images.len(), 3);
    for attrs in &images {
        assert_eq!(attrs.get("width"), Some("600"));
        assert_eq!(attrs.get("height"), Some("400"));
        assert_eq!(attrs.get("layout"), Some("intrinsic"));
        assert_eq!(
            attrs.get("class"),
            Some("amp-wp-unknown-size amp-wp-enforced-sizes")
        );
    }

    assert_eq!(stub.request_count(url), 1);
    assert_eq!(report.converted, 3);
    assert_eq!(report.probed_urls, vec![url.to_string()]);
}
