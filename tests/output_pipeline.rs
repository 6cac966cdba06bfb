//! Complete pipelines: run, persist, reload, render

use bifurc_rs::engine::{
    BifurcationEngine, BinEdges, CobwebTracer, CobwebWindow, DensityHistogramEngine, Engine, IterationConfiguration,
    ParameterSweep, Scenario, ScatterSeries,
};
use bifurc_rs::maps::{MapConfiguration, MapParameters};
use bifurc_rs::models::{Exponential, GeneralPolynomial, QuadraticNewton};
use bifurc_rs::output::export::{CsvConfig, CsvExporter, CsvMetadata, Exporter};
use bifurc_rs::output::visualization::PlotConfig;
use bifurc_rs::output::{
    DENSITY_ARRAY_FILE, DENSITY_IMAGE_FILE, export_lyapunov_csv, plot_bifurcation, plot_cobweb, plot_density,
    read_npy_grid, save_density,
};

#[test]
fn test_density_persist_reload_render() {
    let scenario = Scenario::uniform(
        Box::new(GeneralPolynomial),
        MapConfiguration::sweep_alpha(0.0),
        ParameterSweep::arange(0.3, 0.5, 0.005).unwrap(),
        0.0,
    );
    let histogram = DensityHistogramEngine::new(BinEdges::arange(-5.0, 2.0, 0.01).unwrap())
        .run(&scenario, &IterationConfiguration::density_with_warm_up(2, 100, 400, 100))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();

    // ====== .npy ======

    let path = save_density(&histogram, dir.path()).unwrap();
    assert_eq!(path, dir.path().join(DENSITY_ARRAY_FILE));

    let reloaded = read_npy_grid(&path).unwrap();
    assert_eq!(reloaded.dim(), histogram.shape());
    for (a, b) in reloaded.iter().zip(histogram.grid.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }

    // ====== Raster ======

    let image = dir.path().join(DENSITY_IMAGE_FILE);
    let mut config = PlotConfig::density("r ∈ [0.3, 0.5)");
    config.width = 480;
    config.height = 360;
    plot_density(&histogram, image.to_str().unwrap(), Some(&config)).unwrap();
    assert!(image.exists());
}

#[test]
fn test_bifurcation_csv_and_figure() {
    let scenario = Scenario::uniform(
        Box::new(QuadraticNewton),
        MapConfiguration::sweep_alpha(0.5),
        ParameterSweep::linspace(0.0, 2.0, 40).unwrap(),
        0.3,
    );
    let mut scatter = ScatterSeries::new();
    let result = BifurcationEngine::new()
        .run_observed(&scenario, &IterationConfiguration::trajectory(200, 50), &mut scatter)
        .unwrap();
    let lyapunov = result.lyapunov.as_ref().unwrap();

    let dir = tempfile::tempdir().unwrap();

    let csv = dir.path().join("lyapunov.csv");
    let config = CsvConfig::default().with_metadata(CsvMetadata::from_run(&result.metadata));
    export_lyapunov_csv(lyapunov, csv.to_str().unwrap(), Some(&config)).unwrap();
    let content = std::fs::read_to_string(&csv).unwrap();
    assert!(content.contains("# engine: Bifurcation + Lyapunov"));
    assert_eq!(content.lines().filter(|l| !l.starts_with('#')).count(), 41);

    let figure = dir.path().join("newton.svg");
    plot_bifurcation(&scatter, Some(lyapunov), figure.to_str().unwrap(), None).unwrap();
    assert!(figure.exists());
}

#[test]
fn test_exporters_share_one_interface() {
    fn export_all<E: Exporter>(exporter: &E, lyapunov: &bifurc_rs::engine::LyapunovExponent, path: &str) -> bool {
        exporter.export_lyapunov(lyapunov, path).is_ok()
    }

    let scenario = Scenario::uniform(
        Box::new(Exponential),
        MapConfiguration::sweep_alpha(0.0),
        ParameterSweep::linspace(0.0, 1.0, 5).unwrap(),
        -1.0,
    );
    let result = BifurcationEngine::new()
        .run(&scenario, &IterationConfiguration::trajectory(20, 5))
        .unwrap();
    let lyapunov = result.lyapunov.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("l.csv");
    let npy = dir.path().join("l.npy");
    assert!(export_all(&CsvExporter::default(), &lyapunov, csv.to_str().unwrap()));
    assert!(export_all(&bifurc_rs::output::NpyExporter, &lyapunov, npy.to_str().unwrap()));
}

#[test]
fn test_cobweb_figure() {
    let trace = CobwebTracer::trace(
        &Exponential,
        &MapParameters::default(),
        -1.5,
        &CobwebWindow::new((-3.0, 1.0), (-1.5, 1.5)),
        &IterationConfiguration::cobweb(15),
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cobweb.png");
    plot_cobweb(&trace, path.to_str().unwrap(), Some(&PlotConfig::cobweb("exp(z)(z - 1)"))).unwrap();
    assert!(path.exists());
}
