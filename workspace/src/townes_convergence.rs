use serde::Serialize;
use townes::integrate::{ Grid, Method, terminal };

// compare Euler and RK4 against a fine-step RK4 reference at fixed r_max

const R_MAX: f64 = 6.0;
const IC: f64 = 2.0;

#[derive(Serialize)]
struct ErrorRow {
    h: f64,
    euler: f64,
    rk4: f64,
}

fn grid(h: f64) -> anyhow::Result<Grid> {
    let n = (R_MAX / h).round() as usize + 1;
    Ok(Grid::new(h, n)?)
}

fn main() -> anyhow::Result<()> {
    lib::init_logging();

    let reference = terminal(&grid(1e-4)?, Method::RK4, IC);
    log::info!("reference R({}) = {:.12}", R_MAX, reference);
    let mut rows: Vec<ErrorRow> = Vec::new();
    for h in [0.04, 0.02, 0.01, 0.005, 0.0025, 0.00125] {
        let grid = grid(h)?;
        let euler = (terminal(&grid, Method::Euler, IC) - reference).abs();
        let rk4 = (terminal(&grid, Method::RK4, IC) - reference).abs();
        log::info!("h = {:<8} euler: {:.3e}  rk4: {:.3e}", h, euler, rk4);
        rows.push(ErrorRow { h, euler, rk4 });
    }

    let outdir = lib::outdir()?;
    lib::write_csv(outdir.join("townes_convergence.csv"), rows)?;
    Ok(())
}
