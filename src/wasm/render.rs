use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, HtmlCanvasElement, HtmlInputElement, WebGl2RenderingContext as GL, WebGlProgram,
    WebGlShader,
};

use crate::m3::Mat3;
use crate::scene::{angle_from_degrees, RotationDirection, Scene};

// Matches the inversion the slider demo has always used: the geometry turns
// counter-clockwise on screen as the angle slider grows.
const ROTATION_DIRECTION: RotationDirection = RotationDirection::CounterClockwise;

const VERTEX_SHADER: &str = r#"#version 300 es
in vec2 a_position;
in vec4 a_color;

uniform mat3 u_matrix;

out vec4 v_color;

void main() {
    gl_Position = vec4((u_matrix * vec3(a_position, 1)).xy, 0, 1);
    v_color = a_color;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec4 v_color;
out vec4 outColor;

void main() {
    outColor = v_color;
}
"#;

// A rectangle centred on the local origin, as two triangles.
const GEOMETRY: [f32; 12] = [
    -150.0, -100.0, 150.0, -100.0, -150.0, 100.0, 150.0, -100.0, -150.0, 100.0, 150.0, 100.0,
];
const VERTEX_COUNT: i32 = 6;

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(kind)
        .ok_or("failed to create shader object")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown shader compile error".into());
        gl.delete_shader(Some(&shader));
        Err(log.into())
    }
}

fn link_program(gl: &GL, vert: &WebGlShader, frag: &WebGlShader) -> Result<WebGlProgram, JsValue> {
    let program = gl
        .create_program()
        .ok_or("failed to create program object")?;
    gl.attach_shader(&program, vert);
    gl.attach_shader(&program, frag);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown program link error".into());
        gl.delete_program(Some(&program));
        Err(log.into())
    }
}

fn upload_geometry(gl: &GL) {
    // view() borrows wasm memory directly; safe here because nothing
    // allocates between creating the view and the copy in buffer_data.
    unsafe {
        let view = js_sys::Float32Array::view(&GEOMETRY);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    }
}

fn upload_colors(gl: &GL) {
    fn rand256() -> u8 {
        (js_sys::Math::random() * 256.0) as u8
    }

    // One random RGBA per vertex, fully opaque.
    let mut colors = [0u8; (VERTEX_COUNT as usize) * 4];
    for rgba in colors.chunks_exact_mut(4) {
        rgba[0] = rand256();
        rgba[1] = rand256();
        rgba[2] = rand256();
        rgba[3] = 255;
    }

    unsafe {
        let view = js_sys::Uint8Array::view(&colors);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    }
}

fn slider(id: &str) -> Result<HtmlInputElement, JsValue> {
    window()
        .ok_or("no window")?
        .document()
        .ok_or("no document")?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from(format!("slider #{id} not found")))?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| format!("#{id} is not an <input>").into())
}

/// Compiles the program, uploads the rectangle, and wires the sliders so
/// every input recomputes the scene matrix and redraws.
pub fn start(canvas: HtmlCanvasElement) -> Result<(), JsValue> {
    let gl: GL = canvas
        .get_context("webgl2")?
        .ok_or("WebGL2 not supported")?
        .dyn_into()?;

    let vert = compile_shader(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
    let frag = compile_shader(&gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
    let program = link_program(&gl, &vert, &frag)?;
    gl.use_program(Some(&program));

    let position_loc = gl.get_attrib_location(&program, "a_position");
    let color_loc = gl.get_attrib_location(&program, "a_color");
    let matrix_loc = gl
        .get_uniform_location(&program, "u_matrix")
        .ok_or("u_matrix uniform not found")?;

    // Position attribute: 2 floats per vertex.
    let position_buffer = gl.create_buffer().ok_or("failed to create buffer")?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&position_buffer));
    upload_geometry(&gl);
    gl.enable_vertex_attrib_array(position_loc as u32);
    gl.vertex_attrib_pointer_with_i32(position_loc as u32, 2, GL::FLOAT, false, 0, 0);

    // Color attribute: 4 normalized bytes per vertex.
    let color_buffer = gl.create_buffer().ok_or("failed to create buffer")?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&color_buffer));
    upload_colors(&gl);
    gl.enable_vertex_attrib_array(color_loc as u32);
    gl.vertex_attrib_pointer_with_i32(color_loc as u32, 4, GL::UNSIGNED_BYTE, true, 0, 0);

    let scene = Rc::new(RefCell::new(Scene::new()));

    let draw_scene = {
        let canvas = canvas.clone();
        let scene = scene.clone();
        Rc::new(move || {
            let win = match window() {
                Some(w) => w,
                None => return,
            };
            let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);

            let matrix: Mat3 = scene.borrow().matrix(w as f32, h as f32);
            gl.uniform_matrix3fv_with_f32_array(
                Some(&matrix_loc),
                false,
                &matrix.to_column_major(),
            );

            gl.viewport(0, 0, canvas.width() as i32, canvas.height() as i32);
            gl.clear_color(0.0, 0.0, 0.0, 0.0);
            gl.clear(GL::COLOR_BUFFER_BIT);
            gl.draw_arrays(GL::TRIANGLES, 0, VERTEX_COUNT);
        })
    };

    // Each slider listener mutates one scene field and redraws. The
    // closures are leaked via forget(); they live as long as the page.
    let wire = |id: &str, update: Box<dyn Fn(&mut Scene, f32)>| -> Result<(), JsValue> {
        let input = slider(id)?;
        let scene = scene.clone();
        let draw_scene = draw_scene.clone();
        let target = input.clone();
        let listener = Closure::wrap(Box::new(move || {
            if let Ok(value) = target.value().parse::<f32>() {
                update(&mut scene.borrow_mut(), value);
                draw_scene();
            }
        }) as Box<dyn FnMut()>);
        input.add_event_listener_with_callback("input", listener.as_ref().unchecked_ref())?;
        listener.forget();
        Ok(())
    };

    wire("x", Box::new(|s, v| s.translation[0] = v))?;
    wire("y", Box::new(|s, v| s.translation[1] = v))?;
    wire(
        "angle",
        Box::new(|s, v| s.angle_radians = angle_from_degrees(v, ROTATION_DIRECTION)),
    )?;
    wire("scaleX", Box::new(|s, v| s.scale[0] = v))?;
    wire("scaleY", Box::new(|s, v| s.scale[1] = v))?;

    // Redraw on resize so the projection tracks the viewport.
    let resize_closure = {
        let draw_scene = draw_scene.clone();
        Closure::wrap(Box::new(move || draw_scene()) as Box<dyn FnMut()>)
    };
    window()
        .ok_or("no window")?
        .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    draw_scene();
    Ok(())
}
