// RGB triangle whose brightness cycles with time. The window and render loop live in lib.rs.

use wgpu_primitives::{run, scene::ColorTriangle};

fn main() {
    if let Err(e) = run::<ColorTriangle>() {
        eprintln!("{e:#}");
        std::process::exit(-1);
    }
}
