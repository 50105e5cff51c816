//! Media surface that draws decoded images straight into the layered
//! overlay window.
//!
//! Still images and GIF animations are decoded with the `image` crate,
//! rotated and scaled to the window size, premultiplied, and pushed with
//! `UpdateLayeredWindow` so transparent pixels stay transparent. GIF
//! frames advance on a window timer handled by the daemon's pump.
//!
//! Video is not drawn: the surface reports it as unsupported, so such
//! files are refused up front and skipped by the slideshow.

use std::fs::File;
use std::io::BufReader;
use std::mem;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::imageops::{self, FilterType};
use image::{AnimationDecoder, RgbaImage};
use overlay_core::{MediaError, MediaKind, MediaSize, MediaSurface, RenderParams};
use windows::Win32::Foundation::{COLORREF, HWND, POINT, SIZE};
use windows::Win32::Graphics::Gdi::{
    AC_SRC_ALPHA, AC_SRC_OVER, BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BLENDFUNCTION,
    CreateCompatibleDC, CreateDIBSection, DIB_RGB_COLORS, DeleteDC, DeleteObject, GetDC,
    ReleaseDC, SelectObject,
};
use windows::Win32::UI::WindowsAndMessaging::{KillTimer, SetTimer, ULW_ALPHA, UpdateLayeredWindow};

/// Timer id of the GIF animation on the overlay window.
pub const ANIMATION_TIMER_ID: usize = 3;

/// Browsers clamp faster GIF frames to this delay; so do we.
const MIN_FRAME_DELAY_MS: u32 = 20;

struct Frame {
    image: RgbaImage,
    delay_ms: u32,
}

pub struct LayeredSurface {
    hwnd: HWND,
    frames: Vec<Frame>,
    index: usize,
    params: Option<RenderParams>,
    /// Scaled BGRA pixels per frame for the current params.
    scaled: Vec<Option<Vec<u8>>>,
}

impl LayeredSurface {
    pub fn new(hwnd: HWND) -> Self {
        Self {
            hwnd,
            frames: Vec::new(),
            index: 0,
            params: None,
            scaled: Vec::new(),
        }
    }

    /// Shows the next GIF frame. Called on the animation timer.
    pub fn advance_frame(&mut self) {
        if self.frames.len() < 2 {
            return;
        }
        self.index = (self.index + 1) % self.frames.len();
        self.draw();
        self.schedule_next_frame();
    }

    fn schedule_next_frame(&self) {
        let Some(frame) = self.frames.get(self.index) else {
            return;
        };
        // SAFETY: re-arming an existing timer id replaces it.
        unsafe {
            SetTimer(Some(self.hwnd), ANIMATION_TIMER_ID, frame.delay_ms, None);
        }
    }

    fn stop_animation(&self) {
        // SAFETY: killing a timer that is not running just fails.
        unsafe {
            let _ = KillTimer(Some(self.hwnd), ANIMATION_TIMER_ID);
        }
    }

    fn draw(&mut self) {
        let Some(params) = self.params else {
            return;
        };
        let Some(frame) = self.frames.get(self.index) else {
            return;
        };
        if params.width <= 0 || params.height <= 0 {
            return;
        }
        let pixels = self.scaled[self.index]
            .get_or_insert_with(|| prepare(&frame.image, &params));
        blit(self.hwnd, params.width, params.height, pixels, params.opacity);
    }
}

impl MediaSurface for LayeredSurface {
    fn display(&mut self, path: &Path, kind: MediaKind) -> Result<MediaSize, MediaError> {
        // Decode fully before touching the current frames so a failure
        // leaves the previous media on screen.
        let frames = decode(path, kind)?;
        let first = &frames[0].image;
        let size = MediaSize::new(first.width(), first.height());

        self.stop_animation();
        self.scaled = vec![None; frames.len()];
        self.frames = frames;
        self.index = 0;
        self.draw();
        if self.frames.len() > 1 {
            self.schedule_next_frame();
        }
        Ok(size)
    }

    /// Only images are drawn; videos have no decoder here.
    fn supports(&self, kind: MediaKind) -> bool {
        matches!(kind, MediaKind::AnimatedImage | MediaKind::StillImage)
    }

    fn render(&mut self, params: &RenderParams) {
        if self.params.as_ref() != Some(params) {
            self.scaled.iter_mut().for_each(|s| *s = None);
            self.params = Some(*params);
        }
        self.draw();
    }

    fn set_volume(&mut self, volume: f64, muted: bool) {
        // Images have no soundtrack.
        overlay_core::log_debug!("volume {volume:.2} (muted: {muted}) ignored for images");
    }

    fn stop(&mut self) {
        self.stop_animation();
        self.frames.clear();
        self.scaled.clear();
    }
}

fn decode(path: &Path, kind: MediaKind) -> Result<Vec<Frame>, MediaError> {
    let frames = match kind {
        MediaKind::Video => {
            return Err(MediaError("video playback is not supported".into()));
        }
        MediaKind::AnimatedImage => decode_gif(path)?,
        MediaKind::StillImage | MediaKind::Unrecognized => {
            let image = image::open(path).map_err(|e| MediaError(e.to_string()))?;
            vec![Frame {
                image: image.to_rgba8(),
                delay_ms: 0,
            }]
        }
    };
    if frames.is_empty() {
        return Err(MediaError("file contains no frames".into()));
    }
    Ok(frames)
}

fn decode_gif(path: &Path) -> Result<Vec<Frame>, MediaError> {
    let file = File::open(path).map_err(|e| MediaError(e.to_string()))?;
    let decoder = GifDecoder::new(BufReader::new(file)).map_err(|e| MediaError(e.to_string()))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| MediaError(e.to_string()))?;
    Ok(frames
        .into_iter()
        .map(|frame| {
            let (numer, denom) = frame.delay().numer_denom_ms();
            Frame {
                delay_ms: frame_delay(numer, denom),
                image: frame.into_buffer(),
            }
        })
        .collect())
}

fn frame_delay(numer: u32, denom: u32) -> u32 {
    (numer / denom.max(1)).max(MIN_FRAME_DELAY_MS)
}

/// Rotates, scales, and converts a frame to premultiplied BGRA.
fn prepare(image: &RgbaImage, params: &RenderParams) -> Vec<u8> {
    let oriented = orient(image, params.rotation);
    let resized = imageops::resize(
        &oriented,
        params.width as u32,
        params.height as u32,
        FilterType::Triangle,
    );
    premultiplied_bgra(&resized)
}

fn orient(image: &RgbaImage, rotation: i32) -> RgbaImage {
    match rotation {
        90 => imageops::rotate90(image),
        180 => imageops::rotate180(image),
        270 => imageops::rotate270(image),
        _ => image.clone(),
    }
}

/// `UpdateLayeredWindow` expects BGRA with color already multiplied by
/// alpha.
fn premultiplied_bgra(image: &RgbaImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(image.as_raw().len());
    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        let scale = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
        out.extend_from_slice(&[scale(b), scale(g), scale(r), a]);
    }
    out
}

/// Copies BGRA pixels into a DIB and applies it to the layered window
/// with a constant opacity on top of per-pixel alpha.
fn blit(hwnd: HWND, w: i32, h: i32, pixels: &[u8], opacity: f64) {
    // SAFETY: every DC and bitmap created here is released before return;
    // the pixel copy is bounded by both buffer lengths.
    unsafe {
        let screen_dc = GetDC(None);
        let mem_dc = CreateCompatibleDC(Some(screen_dc));

        let bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: w,
                biHeight: -h, // top-down
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };

        let mut bits = std::ptr::null_mut();
        let Ok(bmp) = CreateDIBSection(Some(mem_dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0)
        else {
            let _ = DeleteDC(mem_dc);
            let _ = ReleaseDC(None, screen_dc);
            return;
        };
        if bits.is_null() {
            let _ = DeleteObject(bmp.into());
            let _ = DeleteDC(mem_dc);
            let _ = ReleaseDC(None, screen_dc);
            return;
        }

        let old = SelectObject(mem_dc, bmp.into());

        // SAFETY: `bits` points to w * h * 4 bytes allocated by
        // CreateDIBSection; `pixels` was scaled to exactly that size.
        let len = (w * h * 4) as usize;
        std::ptr::copy_nonoverlapping(pixels.as_ptr(), bits.cast::<u8>(), len.min(pixels.len()));

        let size = SIZE { cx: w, cy: h };
        let pt_src = POINT::default();
        let blend = BLENDFUNCTION {
            BlendOp: AC_SRC_OVER as u8,
            SourceConstantAlpha: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
            AlphaFormat: AC_SRC_ALPHA as u8,
            ..Default::default()
        };

        // No destination point: the window keeps the position the
        // desktop backend gave it.
        let _ = UpdateLayeredWindow(
            hwnd,
            Some(screen_dc),
            None,
            Some(&size),
            Some(mem_dc),
            Some(&pt_src),
            COLORREF(0),
            Some(&blend),
            ULW_ALPHA,
        );

        SelectObject(mem_dc, old);
        let _ = DeleteObject(bmp.into());
        let _ = DeleteDC(mem_dc);
        let _ = ReleaseDC(None, screen_dc);
    }
}
