/// MeshView Web - WASM bindings for browser hosts
///
/// The page owns the canvas, the renderer and the file parser. It hands
/// parsed vertex/index buffers to [`WebViewer`], reads back statistics for
/// display and copies the camera pose into its scene every animation frame.

use meshview_core::{MeshBuffer, ViewRequest, Viewer, ViewerConfig};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WebViewer {
    viewer: Viewer,
}

#[wasm_bindgen]
impl WebViewer {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<WebViewer, JsValue> {
        Self::from_config(ViewerConfig::default(), width, height).map_err(to_js)
    }

    /// Create a viewer from a TOML configuration document
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(toml: &str, width: u32, height: u32) -> Result<WebViewer, JsValue> {
        ViewerConfig::from_toml_str(toml)
            .and_then(|config| Self::from_config(config, width, height))
            .map_err(to_js)
    }

    /// Load a mesh from a flat `[x, y, z, ...]` array and optional indices
    #[wasm_bindgen(js_name = loadMesh)]
    pub fn load_mesh(
        &mut self,
        name: &str,
        vertices: Vec<f64>,
        indices: Option<Vec<u32>>,
    ) -> Result<(), JsValue> {
        self.try_load_mesh(name, &vertices, indices).map_err(to_js)
    }

    /// Request a named view (`top`, `bottom`, `front`, `back`, `left`,
    /// `right` or `reset`). Returns false if a transition is still running.
    #[wasm_bindgen(js_name = requestView)]
    pub fn request_view(&mut self, view: &str) -> Result<bool, JsValue> {
        self.try_request_view(view, now_ms()).map_err(to_js)
    }

    /// Step the camera transition using `performance.now()`.
    /// Returns true while a transition is still running.
    pub fn advance(&mut self) -> bool {
        self.advance_at(now_ms())
    }

    /// Step the camera transition at an explicit timestamp, such as the one
    /// passed to a `requestAnimationFrame` callback
    #[wasm_bindgen(js_name = advanceAt)]
    pub fn advance_at(&mut self, now: f64) -> bool {
        self.viewer.advance(now);
        self.viewer.is_transitioning()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewer.set_viewport(width, height);
    }

    #[wasm_bindgen(getter, js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.viewer.stats().map_or(0, |s| s.vertex_count)
    }

    #[wasm_bindgen(getter, js_name = faceCount)]
    pub fn face_count(&self) -> usize {
        self.viewer.stats().map_or(0, |s| s.face_count)
    }

    #[wasm_bindgen(getter, js_name = surfaceArea)]
    pub fn surface_area(&self) -> f64 {
        self.viewer.stats().map_or(0.0, |s| s.surface_area)
    }

    #[wasm_bindgen(getter)]
    pub fn volume(&self) -> f64 {
        self.viewer.stats().map_or(0.0, |s| s.volume)
    }

    /// `[min_x, min_y, min_z, max_x, max_y, max_z]`, empty before a load
    #[wasm_bindgen(js_name = boundingBox)]
    pub fn bounding_box(&self) -> Vec<f64> {
        match self.viewer.stats() {
            Some(stats) => {
                let b = stats.bounding_box;
                vec![b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z]
            }
            None => Vec::new(),
        }
    }

    #[wasm_bindgen(js_name = cameraPosition)]
    pub fn camera_position(&self) -> Vec<f64> {
        let p = self.viewer.pose().position;
        vec![p.x, p.y, p.z]
    }

    #[wasm_bindgen(js_name = cameraTarget)]
    pub fn camera_target(&self) -> Vec<f64> {
        let t = self.viewer.pose().target;
        vec![t.x, t.y, t.z]
    }

    /// Vertical field of view in degrees, for the host camera
    #[wasm_bindgen(getter)]
    pub fn fov(&self) -> f64 {
        self.viewer.config().fov_degrees
    }
}

impl WebViewer {
    fn from_config(config: ViewerConfig, width: u32, height: u32) -> meshview_core::Result<Self> {
        Ok(Self {
            viewer: Viewer::new(config, width, height)?,
        })
    }

    fn try_load_mesh(
        &mut self,
        name: &str,
        vertices: &[f64],
        indices: Option<Vec<u32>>,
    ) -> meshview_core::Result<()> {
        let mesh = MeshBuffer::from_flat(name, vertices, indices)?;
        self.viewer.load_mesh(mesh)?;
        Ok(())
    }

    fn try_request_view(&mut self, view: &str, now: f64) -> meshview_core::Result<bool> {
        let request: ViewRequest = view.parse()?;
        self.viewer.request_view(request, now)
    }
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn to_js(e: meshview_core::MeshViewError) -> JsValue {
    log::error!("{}", e);
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info)
        .map_err(|e| JsValue::from_str(&format!("failed to initialise logging: {}", e)))?;
    Ok(())
}
