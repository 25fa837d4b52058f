//! `getUserMedia` camera bound to a `<video>` element in the view.

use async_trait::async_trait;
use engine::error::CaptureError;
use engine::photo::{Camera, VideoSource};
use image::{DynamicImage, RgbaImage};
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack,
};
use yew::html::NodeRef;

use super::{js_field, js_message};

/// Opens the default camera and plays it into the referenced `<video>`.
pub struct BrowserCamera {
    video: NodeRef,
}

impl BrowserCamera {
    pub fn new(video: NodeRef) -> Self {
        Self { video }
    }
}

fn to_capture_error(error: JsValue) -> CaptureError {
    let name = js_field(&error, "name").and_then(|name| name.as_string());
    match name.as_deref() {
        Some("NotAllowedError") | Some("SecurityError") => CaptureError::PermissionDenied,
        _ => CaptureError::CameraUnavailable(js_message(&error)),
    }
}

fn stop_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        track.unchecked_into::<MediaStreamTrack>().stop();
    }
}

#[async_trait(?Send)]
impl Camera for BrowserCamera {
    type Source = BrowserVideo;

    async fn open(&self) -> Result<BrowserVideo, CaptureError> {
        let media = web_sys::window()
            .ok_or_else(|| CaptureError::CameraUnavailable("no window".to_string()))?
            .navigator()
            .media_devices()
            .map_err(|_| CaptureError::CameraUnavailable("no media devices".to_string()))?;

        let constraints = MediaStreamConstraints::new();
        Reflect::set(&constraints, &JsValue::from_str("video"), &JsValue::TRUE).ok();
        Reflect::set(&constraints, &JsValue::from_str("audio"), &JsValue::FALSE).ok();

        let promise = media
            .get_user_media_with_constraints(&constraints)
            .map_err(to_capture_error)?;
        let stream: MediaStream = JsFuture::from(promise)
            .await
            .map_err(to_capture_error)?
            .dyn_into()
            .map_err(|_| CaptureError::CameraUnavailable("not a media stream".to_string()))?;

        let Some(video) = self.video.cast::<HtmlVideoElement>() else {
            stop_tracks(&stream);
            return Err(CaptureError::CameraUnavailable(
                "video element is not mounted".to_string(),
            ));
        };
        video.set_src_object(Some(&stream));
        // Autoplay usually starts it already; a rejected play() is not fatal.
        video.play().ok();

        Ok(BrowserVideo { stream, video })
    }
}

/// A live stream playing into the view's `<video>`.
pub struct BrowserVideo {
    stream: MediaStream,
    video: HtmlVideoElement,
}

impl VideoSource for BrowserVideo {
    fn frame(&self) -> Result<DynamicImage, CaptureError> {
        let width = self.video.video_width();
        let height = self.video.video_height();
        if width == 0 || height == 0 {
            return Err(CaptureError::Frame("video has no data yet".to_string()));
        }

        let canvas: HtmlCanvasElement = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.create_element("canvas").ok())
            .and_then(|element| element.dyn_into().ok())
            .ok_or_else(|| CaptureError::Frame("cannot create a canvas".to_string()))?;
        canvas.set_width(width);
        canvas.set_height(height);

        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|context| context.dyn_into().ok())
            .ok_or_else(|| CaptureError::Frame("no 2d context".to_string()))?;
        context
            .draw_image_with_html_video_element(&self.video, 0.0, 0.0)
            .map_err(|error| CaptureError::Frame(js_message(&error)))?;
        let pixels = context
            .get_image_data(0.0, 0.0, f64::from(width), f64::from(height))
            .map_err(|error| CaptureError::Frame(js_message(&error)))?;

        let rgba = RgbaImage::from_raw(width, height, pixels.data().0)
            .ok_or_else(|| CaptureError::Frame("frame size mismatch".to_string()))?;
        Ok(DynamicImage::ImageRgba8(rgba))
    }

    fn stop(&mut self) {
        stop_tracks(&self.stream);
        self.video.set_src_object(None);
    }
}
