#![no_main]

use bezier_path::{parse_control_path_xml, LoopBehaviour, VertexPath};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Jeder erfolgreich geparste Pfad muss sich unterteilen und abfragen lassen
    if let Ok(path) = parse_control_path_xml(text) {
        let vertex_path = VertexPath::by_angle_error(&path, 0.3, 0.01);
        let _ = vertex_path.point_at_position(0.5, LoopBehaviour::Loop);
    }
});
