use serde::Serialize;
use townes::{ shoot::{ Config, Iterate }, utils };

// solve for R(0) by bisection over the full reference grid and write out the
// profile along with the search trace

#[allow(non_snake_case)]
#[derive(Serialize)]
struct ProfileRow {
    r: f64,
    R: f64,
    V: f64,
}

#[derive(Serialize)]
struct TraceRow {
    iter: usize,
    ic: f64,
    residual: f64,
}

impl From<Iterate> for TraceRow {
    fn from(it: Iterate) -> Self {
        Self { iter: it.iter, ic: it.ic, residual: it.residual }
    }
}

#[allow(non_snake_case)]
fn main() -> anyhow::Result<()> {
    lib::init_logging();

    let config = Config::default();
    log::info!("{:?}", config);
    let shooter = config.shooter()?;
    log::info!("r_max = {}", shooter.get_grid().r_max());

    let mut trace: Vec<TraceRow> = Vec::new();
    let root = shooter.solve_traced(config.search, |it| trace.push(it.into()))?;
    let traj = shooter.profile(root.ic);
    log::info!("R(0) = {:.10}", root.ic);
    log::info!("R(r_max) = {:+.3e}", root.residual);
    log::info!("nodes = {}", utils::node_count(&traj.R));
    log::info!("P = {:.6}", utils::trajectory_power(&traj));

    let outdir = lib::outdir()?;
    lib::write_csv(outdir.join("townes_trace.csv"), trace)?;
    let rows
        = traj.r.iter().zip(&traj.R).zip(&traj.V)
        .map(|((&r, &R), &V)| ProfileRow { r, R, V });
    lib::write_csv(outdir.join("townes_profile.csv"), rows)?;
    Ok(())
}
