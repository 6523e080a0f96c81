// Green line strip on black. The window and render loop live in lib.rs.

use wgpu_primitives::{run, scene::GreenLine};

fn main() {
    if let Err(e) = run::<GreenLine>() {
        eprintln!("{e:#}");
        std::process::exit(-1);
    }
}
