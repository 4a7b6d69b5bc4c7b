use townes::{ integrate::Method, shoot::{ Config, Search }, utils };

// solve for the Townes profile and print a few of its properties

fn main() {
    // a moderate r_max keeps the residual smooth enough for the secant method
    let config = Config {
        h: 0.001,
        n: 6001,
        method: Method::RK4,
        search: Search::Secant {
            bounds: (2.2, 2.3),
            epsilon: Some(1e-8),
            maxiters: Some(100),
        },
    };
    let (root, traj) = config.run().unwrap();
    println!("R(0) = {:.10} after {} iterations", root.ic, root.iters);
    println!("R(r_max) = {:+.3e}", root.residual);
    println!("nodes = {}", utils::node_count(&traj.R));
    println!("P = {:.6}", utils::trajectory_power(&traj));
}
