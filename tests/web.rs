//! Browser smoke tests: `wasm-pack test --headless --firefox`
#![cfg(target_arch = "wasm32")]

use learn_webgl::{demo_names, Demo};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(320);
    canvas.set_height(240);
    canvas
}

#[wasm_bindgen_test]
fn every_demo_renders_and_releases() {
    for name in demo_names() {
        let name = name.as_string().unwrap();
        let demo = Demo::new(canvas(), &name, None).unwrap();
        demo.render();
        assert_eq!(demo.step(), 1);
        demo.delete();
        demo.delete();
    }
}

#[wasm_bindgen_test]
fn unknown_demo_is_an_error() {
    assert!(Demo::new(canvas(), "teapot", None).is_err());
}

#[wasm_bindgen_test]
fn bad_config_is_an_error() {
    let yaml = Some("camera:\n  near: -1\n".to_string());
    assert!(Demo::new(canvas(), "pyramid", yaml).is_err());
}

#[wasm_bindgen_test]
fn controls_and_mouse() {
    let demo = Demo::new(canvas(), "robot_arm", None).unwrap();
    assert!(demo.set_control("forearm", "45").unwrap());
    assert!(!demo.set_control("nope", "1").unwrap());
    assert!(demo.set_control("forearm", "not a number").is_err());

    demo.on_mouse_down(10.0, 10.0);
    demo.on_mouse_move(30.0, 20.0);
    demo.on_mouse_up();
    demo.resize(640, 480);
    demo.delete();
}

#[wasm_bindgen_test]
fn surface_rebuilds_on_control() {
    let demo = Demo::new(canvas(), "surface", Some("surface:\n  resolution: 8\n".to_string())).unwrap();
    assert!(demo.set_control("resolution", "16").unwrap());
    assert!(demo.set_control("amplitude", "0.5").unwrap());
    demo.delete();
}

#[wasm_bindgen_test]
fn animation_flag() {
    let demo = Demo::new(canvas(), "bezier_path", None).unwrap();
    assert!(!demo.is_animating());
    demo.start_animation().unwrap();
    assert!(demo.is_animating());
    demo.stop_animation();
    assert!(!demo.is_animating());
    demo.delete();
    assert!(demo.start_animation().is_err());
}
