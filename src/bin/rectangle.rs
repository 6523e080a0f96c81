// Yellow indexed rectangle. The window and render loop live in lib.rs.

use wgpu_primitives::{run, scene::Rectangle};

fn main() {
    if let Err(e) = run::<Rectangle>() {
        eprintln!("{e:#}");
        std::process::exit(-1);
    }
}
