//! Image Cache for Meme Art
//!
//! Downloads and decodes remote images on the async runtime, then uploads
//! them to egui textures on the UI thread.

use anyhow::Context as _;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use log::{debug, warn};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Minimum wait before a failed image may be retried
const RETRY_COOLDOWN: Duration = Duration::from_secs(3);

/// Image loading state. A URL with no entry has never been requested.
#[derive(Clone)]
pub enum ImageState {
    /// Fetch in flight
    Loading,
    /// Uploaded and ready to draw
    Loaded(egui::TextureHandle),
    /// Failed to load; stays failed until an explicit retry
    Failed { reason: String, retry_after: Instant },
}

/// Decoded RGBA8 pixels
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

struct FetchOutcome {
    url: String,
    result: anyhow::Result<DecodedImage>,
}

/// URL-keyed texture cache
pub struct ImageCache {
    images: HashMap<String, ImageState>,
    /// HTTP client for fetching images
    client: reqwest::Client,
    runtime: tokio::runtime::Handle,
    max_side: u32,
    retry_cooldown: Duration,
    fetches_started: usize,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
}

impl ImageCache {
    pub fn new(client: reqwest::Client, runtime: tokio::runtime::Handle, max_side: u32) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            images: HashMap::new(),
            client,
            runtime,
            max_side: max_side.max(1),
            retry_cooldown: RETRY_COOLDOWN,
            fetches_started: 0,
            tx,
            rx,
        }
    }

    pub fn with_retry_cooldown(mut self, cooldown: Duration) -> Self {
        self.retry_cooldown = cooldown;
        self
    }

    /// Get image state for a URL
    pub fn state(&self, url: &str) -> Option<&ImageState> {
        self.images.get(url)
    }

    /// Number of downloads spawned so far
    pub fn fetches_started(&self) -> usize {
        self.fetches_started
    }

    /// Texture for `url`, starting a download on first request
    pub fn texture(&mut self, ctx: &egui::Context, url: &str) -> Option<egui::TextureHandle> {
        match self.images.get(url) {
            Some(ImageState::Loaded(texture)) => Some(texture.clone()),
            Some(_) => None,
            None => {
                self.request_load(ctx, url);
                None
            }
        }
    }

    /// Request loading an image (non-blocking)
    pub fn request_load(&mut self, ctx: &egui::Context, url: &str) {
        if self.images.contains_key(url) {
            return;
        }

        self.images.insert(url.to_string(), ImageState::Loading);
        self.fetches_started += 1;

        let client = self.client.clone();
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        let url = url.to_string();
        let max_side = self.max_side;

        self.runtime.spawn(async move {
            let result = Self::load_image_async(&client, &url, max_side).await;
            if tx.send(FetchOutcome { url, result }).is_ok() {
                ctx.request_repaint();
            }
        });
    }

    pub fn can_retry(&self, url: &str) -> bool {
        matches!(
            self.images.get(url),
            Some(ImageState::Failed { retry_after, .. }) if Instant::now() >= *retry_after
        )
    }

    /// Forget a failed load so the next request downloads again.
    /// Returns false if the entry is not failed or is still cooling down.
    pub fn retry(&mut self, url: &str) -> bool {
        if !self.can_retry(url) {
            return false;
        }
        debug!("Retrying image {}", url);
        self.images.remove(url);
        true
    }

    /// Time until the next failed image becomes retryable
    pub fn next_retry_in(&self, now: Instant) -> Option<Duration> {
        self.images
            .values()
            .filter_map(|state| match state {
                ImageState::Failed { retry_after, .. } if *retry_after > now => {
                    Some(*retry_after - now)
                }
                _ => None,
            })
            .min()
    }

    /// Upload finished downloads (call from main loop)
    pub fn update(&mut self, ctx: &egui::Context) {
        while let Ok(outcome) = self.rx.try_recv() {
            self.finish(ctx, outcome);
        }

        // Wake up to enable the Retry button once the cooldown ends
        if let Some(wait) = self.next_retry_in(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }

    fn finish(&mut self, ctx: &egui::Context, outcome: FetchOutcome) {
        let FetchOutcome { url, result } = outcome;

        let state = match result.and_then(|image| upload(ctx, &url, image)) {
            Ok(texture) => {
                debug!("Loaded image: {} ({:?})", url, texture.size());
                ImageState::Loaded(texture)
            }
            Err(e) => {
                warn!("Failed to load image {}: {:#}", url, e);
                ImageState::Failed {
                    reason: format!("{:#}", e),
                    retry_after: Instant::now() + self.retry_cooldown,
                }
            }
        };
        self.images.insert(url, state);
    }

    /// Load an image asynchronously
    async fn load_image_async(
        client: &reqwest::Client,
        url: &str,
        max_side: u32,
    ) -> anyhow::Result<DecodedImage> {
        let parsed = url::Url::parse(url).context("Invalid image URL")?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("Unsupported URL scheme: {}", parsed.scheme());
        }

        let response = client
            .get(parsed.as_str())
            .header("Accept", "image/webp,image/png,image/jpeg,image/gif,*/*")
            .send()
            .await
            .context("Failed to fetch image")?;

        if !response.status().is_success() {
            anyhow::bail!("Image fetch failed: {}", response.status());
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read image bytes")?;

        tokio::task::spawn_blocking(move || decode_image(&bytes, max_side))
            .await
            .context("Image decode task failed")?
    }
}

/// Decode to RGBA8, downscaling so neither side exceeds `max_side`
pub fn decode_image(bytes: &[u8], max_side: u32) -> anyhow::Result<DecodedImage> {
    let img = image::load_from_memory(bytes).context("Failed to decode image")?;

    let (orig_w, orig_h) = (img.width(), img.height());
    let img = if orig_w > max_side || orig_h > max_side {
        let scale = max_side as f32 / orig_w.max(orig_h) as f32;
        let new_w = ((orig_w as f32 * scale) as u32).max(1);
        let new_h = ((orig_h as f32 * scale) as u32).max(1);
        debug!("Resizing image {}x{} -> {}x{}", orig_w, orig_h, new_w, new_h);
        img.resize(new_w, new_h, image::imageops::FilterType::Triangle)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    let width = rgba.width();
    let height = rgba.height();

    Ok(DecodedImage {
        pixels: rgba.into_raw(),
        width,
        height,
    })
}

fn upload(
    ctx: &egui::Context,
    name: &str,
    image: DecodedImage,
) -> anyhow::Result<egui::TextureHandle> {
    let expected = image.width as usize * image.height as usize * 4;
    if image.pixels.len() != expected || expected == 0 {
        anyhow::bail!(
            "Pixel buffer is {} bytes, expected {} for {}x{}",
            image.pixels.len(),
            expected,
            image.width,
            image.height
        );
    }

    let color = egui::ColorImage::from_rgba_unmultiplied(
        [image.width as usize, image.height as usize],
        &image.pixels,
    );
    Ok(ctx.load_texture(name, color, egui::TextureOptions::LINEAR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const URL: &str = "https://i.imgflip.com/30b1gx.jpg";

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn pixels(width: u32, height: u32) -> DecodedImage {
        DecodedImage {
            pixels: vec![128; (width * height * 4) as usize],
            width,
            height,
        }
    }

    fn cache(runtime: &tokio::runtime::Runtime) -> ImageCache {
        ImageCache::new(reqwest::Client::new(), runtime.handle().clone(), 64)
    }

    /// Simulate a finished download without touching the network
    fn deliver(cache: &mut ImageCache, ctx: &egui::Context, url: &str, result: anyhow::Result<DecodedImage>) {
        cache.images.insert(url.to_string(), ImageState::Loading);
        cache
            .tx
            .send(FetchOutcome {
                url: url.to_string(),
                result,
            })
            .unwrap();
        cache.update(ctx);
    }

    fn wait_until_settled(cache: &mut ImageCache, ctx: &egui::Context, url: &str) {
        for _ in 0..500 {
            cache.update(ctx);
            if !matches!(cache.state(url), Some(ImageState::Loading)) {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("image {} never settled", url);
    }

    #[test]
    fn test_unrequested_has_no_entry() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut cache = cache(&runtime);
        let ctx = egui::Context::default();

        cache.update(&ctx);
        assert!(cache.state(URL).is_none());
        assert!(!cache.can_retry(URL));
        assert_eq!(cache.fetches_started(), 0);
    }

    #[test]
    fn test_loaded_returns_same_handle_without_refetch() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut cache = cache(&runtime);
        let ctx = egui::Context::default();

        deliver(&mut cache, &ctx, URL, Ok(pixels(4, 2)));

        let first = cache.texture(&ctx, URL).unwrap();
        let second = cache.texture(&ctx, URL).unwrap();
        assert_eq!(first.id(), second.id());
        assert_eq!(first.size(), [4, 2]);
        assert_eq!(cache.fetches_started(), 0);
    }

    #[test]
    fn test_bad_pixel_buffer_fails() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut cache = cache(&runtime);
        let ctx = egui::Context::default();

        let short = DecodedImage {
            pixels: vec![0; 7],
            width: 2,
            height: 2,
        };
        deliver(&mut cache, &ctx, URL, Ok(short));

        assert!(matches!(cache.state(URL), Some(ImageState::Failed { .. })));
        assert!(cache.texture(&ctx, URL).is_none());
    }

    #[test]
    fn test_failed_is_not_refetched_until_retry() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut cache = cache(&runtime).with_retry_cooldown(Duration::ZERO);
        let ctx = egui::Context::default();
        let url = "ftp://example.com/meme.png";

        assert!(cache.texture(&ctx, url).is_none());
        assert!(matches!(cache.state(url), Some(ImageState::Loading)));
        assert_eq!(cache.fetches_started(), 1);

        wait_until_settled(&mut cache, &ctx, url);
        match cache.state(url) {
            Some(ImageState::Failed { reason, .. }) => assert!(reason.contains("ftp")),
            _ => panic!("expected failed state"),
        }

        for _ in 0..3 {
            assert!(cache.texture(&ctx, url).is_none());
        }
        assert_eq!(cache.fetches_started(), 1);

        assert!(cache.retry(url));
        assert!(cache.state(url).is_none());
        cache.texture(&ctx, url);
        assert_eq!(cache.fetches_started(), 2);
    }

    #[test]
    fn test_retry_respects_cooldown() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut cache = cache(&runtime).with_retry_cooldown(Duration::from_secs(3600));
        let ctx = egui::Context::default();

        deliver(&mut cache, &ctx, URL, Err(anyhow::anyhow!("Image fetch failed: 404")));

        assert!(!cache.can_retry(URL));
        assert!(!cache.retry(URL));
        assert!(matches!(cache.state(URL), Some(ImageState::Failed { .. })));
    }

    #[test]
    fn test_next_retry_tracks_cooldown() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut cache = cache(&runtime).with_retry_cooldown(Duration::from_secs(60));
        let ctx = egui::Context::default();
        assert!(cache.next_retry_in(Instant::now()).is_none());

        deliver(&mut cache, &ctx, URL, Err(anyhow::anyhow!("Image fetch failed: 500")));
        deliver(&mut cache, &ctx, "https://i.imgflip.com/ok.jpg", Ok(pixels(1, 1)));

        let now = Instant::now();
        let wait = cache.next_retry_in(now).unwrap();
        assert!(wait > Duration::from_secs(50) && wait <= Duration::from_secs(60));

        // nothing left to wait for once the cooldown has passed
        assert!(cache.next_retry_in(now + Duration::from_secs(61)).is_none());
    }

    #[test]
    fn test_decode_png() {
        let decoded = decode_image(&png(3, 2), 64).unwrap();
        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.pixels.len(), 3 * 2 * 4);
        assert_eq!(&decoded.pixels[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_downscales_large_images() {
        let decoded = decode_image(&png(400, 200), 100).unwrap();
        assert_eq!((decoded.width, decoded.height), (100, 50));
        assert_eq!(decoded.pixels.len(), 100 * 50 * 4);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_image(b"definitely not an image", 64).is_err());
    }
}
