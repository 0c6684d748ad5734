/// Simple custom benchmarking without criterion
use std::time::Instant;

use stable_fluids::generators::beam;
use stable_fluids::{Executor, Field, FluidParams, FluidState, PressureScheme};

fn time_it<F: FnMut()>(name: &str, iterations: usize, mut f: F) {
    // Warmup
    for _ in 0..5 {
        f();
    }

    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    let elapsed = start.elapsed();

    let avg_ms = elapsed.as_secs_f64() * 1000.0 / iterations as f64;
    println!("{}: {:.3}ms avg ({} iterations)", name, avg_ms, iterations);
}

fn beam_state(size: usize, executor: Executor) -> FluidState {
    let field = Field::new(size, size, beam(size, size, 1000.0, 50.0))
        .expect("benchmark grid is not empty");
    FluidState::new(field).with_executor(executor)
}

fn main() {
    println!("\n=== Stable Fluids Benchmarks ===\n");

    let sizes = [64, 128, 256, 512];
    let executors = [Executor::Sequential, Executor::Parallel];

    println!("--- Projection ---");
    for &size in &sizes {
        for scheme in [PressureScheme::Jacobi, PressureScheme::RedBlack] {
            for executor in executors {
                let mut state = beam_state(size, executor);
                time_it(
                    &format!("project {:?} {:?} (n={})", scheme, executor, size),
                    10,
                    || state.project_with(20, 1.0, scheme),
                );
            }
        }
    }

    println!("\n--- Advection ---");
    for &size in &sizes {
        for executor in executors {
            let mut state = beam_state(size, executor);
            time_it(&format!("advect {:?} (n={})", executor, size), 50, || {
                state.advect(0.5)
            });
        }
    }

    println!("\n--- Diffusion ---");
    for &size in &sizes {
        for executor in executors {
            let mut state = beam_state(size, executor);
            time_it(&format!("diffuse {:?} (n={})", executor, size), 50, || {
                state.diffuse(2, 0.03)
            });
        }
    }

    println!("\n--- Full step ---");
    let params = FluidParams::default();
    for &size in &sizes {
        let mut state = beam_state(size, Executor::Auto);
        time_it(&format!("step (n={})", size), 10, || state.step(&params));
    }

    println!("\n=== Benchmark Complete ===\n");
}
