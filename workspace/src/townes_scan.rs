use ndarray as nd;
use serde::Serialize;
use townes::{ integrate::{ Grid, Method, terminal }, shoot };

// tabulate the shooting residual R(r_max) over a range of R(0) for both
// integration schemes

const H: f64 = 0.001;
const N: usize = 20700;

#[derive(Serialize)]
struct ScanRow {
    ic: f64,
    euler: f64,
    rk4: f64,
}

fn main() -> anyhow::Result<()> {
    lib::init_logging();

    let grid = Grid::new(H, N)?;
    let ic: nd::Array1<f64> = nd::Array1::linspace(2.0, 2.5, 501);
    let rows: Vec<ScanRow>
        = ic.iter()
        .map(|&ic| {
            ScanRow {
                ic,
                euler: terminal(&grid, Method::Euler, ic),
                rk4: terminal(&grid, Method::RK4, ic),
            }
        })
        .collect();

    for method in [Method::Euler, Method::RK4] {
        match shoot::find_bracket(|ic| terminal(&grid, method, ic), 2.0, 2.5, 50) {
            Ok((a, b)) => log::info!("{:?}: sign change in ({:.4}, {:.4})", method, a, b),
            Err(err) => log::warn!("{:?}: {}", method, err),
        }
    }

    let outdir = lib::outdir()?;
    lib::write_csv(outdir.join("townes_scan.csv"), rows)?;
    Ok(())
}
