use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

pub mod animation;
pub mod config;
pub mod math;
pub mod model;
pub mod path;
pub mod render;
pub mod scene;

use animation::AnimationState;
use config::DemoConfig;
use render::WebGLContext;
use scene::{ControlValue, MouseDrag, OrbitCamera, Scene, SceneKind, SceneView};

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A second init (e.g. two modules on one page) leaves the first logger in place
    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(log::Level::Info);
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

struct DemoInner {
    ctx: WebGLContext,
    scene: Box<dyn Scene>,
    camera: OrbitCamera,
    drag: MouseDrag,
    animation: AnimationState,
    clear_color: [f32; 4],
    width: i32,
    height: i32,
    /// A `requestAnimationFrame` callback is scheduled
    loop_running: bool,
    deleted: bool,
}

impl DemoInner {
    fn draw(&mut self) {
        if self.deleted {
            return;
        }
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let view = SceneView {
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(aspect),
        };

        self.ctx.viewport(0, 0, self.width, self.height);
        self.ctx.clear(self.clear_color);
        self.scene.render(&self.ctx, &view);
    }

    fn advance(&mut self) -> u32 {
        let frame = self.animation.step();
        self.scene.on_frame(self.animation.progress());
        frame
    }
}

fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    web_sys::window()
        .ok_or("No window available")?
        .request_animation_frame(callback.as_ref().unchecked_ref())
}

/// One running demo bound to a canvas
#[wasm_bindgen]
pub struct Demo {
    inner: Rc<RefCell<DemoInner>>,
}

#[wasm_bindgen]
impl Demo {
    /// Create the demo named `kind` on `canvas`, optionally configured from YAML
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, kind: &str, config_yaml: Option<String>) -> Result<Demo, JsValue> {
        let kind: SceneKind = kind.parse().map_err(|e: String| JsValue::from_str(&e))?;
        let config = match config_yaml {
            Some(yaml) => DemoConfig::from_yaml(&yaml).map_err(|e| JsValue::from_str(&e))?,
            None => DemoConfig::default(),
        };

        let gl = canvas
            .get_context("webgl2")?
            .ok_or("Failed to get WebGL2 context")?
            .dyn_into::<WebGl2RenderingContext>()?;
        let ctx = WebGLContext::new(gl);
        ctx.enable_depth_test();

        let scene = scene::create_scene(kind, &ctx, &config).map_err(|e| JsValue::from_str(&e))?;

        let inner = DemoInner {
            ctx,
            scene,
            camera: OrbitCamera::from_config(&config.camera),
            drag: MouseDrag::default(),
            animation: AnimationState::new(config.animation.frames, config.animation.looping),
            clear_color: config.clear_color,
            width: canvas.width() as i32,
            height: canvas.height() as i32,
            loop_running: false,
            deleted: false,
        };

        Ok(Self {
            inner: Rc::new(RefCell::new(inner)),
        })
    }

    /// Draw the current state once
    #[wasm_bindgen]
    pub fn render(&self) {
        self.inner.borrow_mut().draw();
    }

    #[wasm_bindgen]
    pub fn on_mouse_down(&self, x: f32, y: f32) {
        self.inner.borrow_mut().drag.press(x, y);
    }

    /// Orbit the camera while the button is held
    #[wasm_bindgen]
    pub fn on_mouse_move(&self, x: f32, y: f32) {
        let mut inner = self.inner.borrow_mut();
        if let Some((dx, dy)) = inner.drag.motion(x, y) {
            inner.camera.drag(dx, dy);
            inner.draw();
        }
    }

    #[wasm_bindgen]
    pub fn on_mouse_up(&self) {
        self.inner.borrow_mut().drag.release();
    }

    /// Move the camera toward (negative) or away from (positive) its target
    #[wasm_bindgen]
    pub fn on_wheel(&self, delta: f32) {
        let mut inner = self.inner.borrow_mut();
        inner.camera.zoom(delta * 0.01);
        inner.draw();
    }

    /// Apply a slider or checkbox value. Returns false when the demo has no
    /// control by that name.
    #[wasm_bindgen]
    pub fn set_control(&self, name: &str, value: &str) -> Result<bool, JsValue> {
        let value = ControlValue::parse(value).map_err(|e| JsValue::from_str(&e))?;

        let mut inner = self.inner.borrow_mut();
        let inner = &mut *inner;
        let handled = inner
            .scene
            .set_control(&inner.ctx, name, value)
            .map_err(|e| JsValue::from_str(&e))?;

        if handled {
            inner.draw();
        } else {
            log::warn!("Unknown control '{}'", name);
        }
        Ok(handled)
    }

    /// Run the animation from the current frame, one step per browser frame
    #[wasm_bindgen]
    pub fn start_animation(&self) -> Result<(), JsValue> {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.deleted {
                return Err(JsValue::from_str("Demo has been deleted"));
            }
            inner.animation.start();
            // An already scheduled callback picks up the restarted flag
            if inner.loop_running {
                return Ok(());
            }
            inner.loop_running = true;
        }

        let handle: FrameCallback = Rc::new(RefCell::new(None));
        let next = handle.clone();
        let state = self.inner.clone();

        *handle.borrow_mut() = Some(Closure::new(move || {
            let keep_going = {
                let mut inner = state.borrow_mut();
                if inner.deleted || !inner.animation.active {
                    false
                } else {
                    inner.advance();
                    inner.draw();
                    inner.animation.active
                }
            };

            let scheduled = keep_going
                && match next.borrow().as_ref().map(request_animation_frame) {
                    Some(Ok(_)) => true,
                    Some(Err(e)) => {
                        log::error!("requestAnimationFrame failed: {:?}", e);
                        false
                    }
                    None => false,
                };

            if !scheduled {
                state.borrow_mut().loop_running = false;
                // Breaks the closure's reference cycle
                let _ = next.borrow_mut().take();
            }
        }));

        let first = handle.borrow().as_ref().map(request_animation_frame);
        match first {
            Some(Ok(_)) => Ok(()),
            Some(Err(e)) => {
                self.inner.borrow_mut().loop_running = false;
                handle.borrow_mut().take();
                Err(e)
            }
            None => Ok(()),
        }
    }

    /// The running callback exits on its next frame
    #[wasm_bindgen]
    pub fn stop_animation(&self) {
        self.inner.borrow_mut().animation.stop();
    }

    #[wasm_bindgen]
    pub fn is_animating(&self) -> bool {
        self.inner.borrow().animation.active
    }

    #[wasm_bindgen]
    pub fn frame(&self) -> u32 {
        self.inner.borrow().animation.frame
    }

    /// Advance one frame by hand and redraw
    #[wasm_bindgen]
    pub fn step(&self) -> u32 {
        let mut inner = self.inner.borrow_mut();
        let frame = inner.advance();
        inner.draw();
        frame
    }

    #[wasm_bindgen]
    pub fn resize(&self, width: i32, height: i32) {
        let mut inner = self.inner.borrow_mut();
        inner.width = width.max(1);
        inner.height = height.max(1);
        inner.draw();
    }

    /// Release every GPU resource. Later calls do nothing.
    #[wasm_bindgen]
    pub fn delete(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.deleted {
            return;
        }
        inner.animation.stop();
        let inner = &mut *inner;
        inner.scene.delete(&inner.ctx);
        inner.deleted = true;
        log::info!("Demo resources released");
    }
}

/// Names accepted by `new Demo(canvas, kind)`
#[wasm_bindgen]
pub fn demo_names() -> Vec<JsValue> {
    SceneKind::ALL
        .iter()
        .map(|kind| JsValue::from_str(kind.name()))
        .collect()
}
