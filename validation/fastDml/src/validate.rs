use fastDml::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Bernoulli, Distribution, Normal, Poisson};
use serde::Serialize;
use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize)]
struct ScenarioReport {
    name: String,
    notes: String,
    true_effect: f64,
    n_obs: usize,
    n_folds: usize,
    replications: usize,
    learners: Vec<LearnerReport>,
}

#[derive(Debug, Serialize)]
struct LearnerReport {
    learner: String,
    mean_estimate: f64,
    bias: f64,
    rmse: f64,
    empirical_sd: f64,
    mean_std_error: f64,
    coverage: f64,
    failures: usize,
}

struct Sample {
    y: Vec<f64>,
    d: Vec<f64>,
    x: Vec<f64>,
    n_features: usize,
}

// ============================================================================
// Data Generation
// ============================================================================

/// Two Gaussian confounders, continuous treatment, effect 1.0.
fn workshop_sample(n: usize, rng: &mut StdRng) -> Result<Sample, Box<dyn Error>> {
    let normal = Normal::new(0.0, 1.0)?;
    let mut s = Sample {
        y: Vec::with_capacity(n),
        d: Vec::with_capacity(n),
        x: Vec::with_capacity(2 * n),
        n_features: 2,
    };
    for _ in 0..n {
        let x1 = normal.sample(rng);
        let x2 = normal.sample(rng);
        let d = 0.5 * x1 + 0.3 * x2 + normal.sample(rng);
        let y = d + 0.5 * x1 - 0.5 * x2 + normal.sample(rng);
        s.x.extend_from_slice(&[x1, x2]);
        s.d.push(d);
        s.y.push(y);
    }
    Ok(s)
}

/// Ad targeting: age, prior clicks and device drive a binary tactic, effect 0.4.
fn ads_sample(n: usize, rng: &mut StdRng) -> Result<Sample, Box<dyn Error>> {
    let age_dist = Normal::new(35.0, 10.0)?;
    let clicks_dist = Poisson::new(2.0)?;
    let mobile_dist = Bernoulli::new(0.6)?;
    let noise = Normal::new(0.0, 1.0)?;

    let age: Vec<f64> = (0..n).map(|_| age_dist.sample(rng)).collect();
    let clicks: Vec<f64> = (0..n).map(|_| clicks_dist.sample(rng)).collect();
    let mobile: Vec<f64> = (0..n)
        .map(|_| if mobile_dist.sample(rng) { 1.0 } else { 0.0 })
        .collect();
    let age_mean = age.iter().sum::<f64>() / n as f64;

    let mut s = Sample {
        y: Vec::with_capacity(n),
        d: Vec::with_capacity(n),
        x: Vec::with_capacity(3 * n),
        n_features: 3,
    };
    for i in 0..n {
        let logit = 0.1 * (age[i] - age_mean) + 0.2 * clicks[i] + 0.3 * mobile[i] + noise.sample(rng);
        let p = 1.0 / (1.0 + (-logit).exp());
        let tactic = if Bernoulli::new(p)?.sample(rng) { 1.0 } else { 0.0 };
        let baseline = 0.05 * age[i] - 0.02 * clicks[i] + 0.1 * mobile[i] + noise.sample(rng);
        s.x.extend_from_slice(&[age[i], clicks[i], mobile[i]]);
        s.d.push(tactic);
        s.y.push(0.4 * tactic + baseline);
    }
    Ok(s)
}

// ============================================================================
// Monte Carlo
// ============================================================================

fn monte_carlo<F>(name: &str, samples: &[Sample], theta: f64, fit: F) -> LearnerReport
where
    F: Fn(&Dataset<f64>) -> Result<EffectEstimate<f64>, DmlError>,
{
    let mut estimates = Vec::with_capacity(samples.len());
    let mut std_errors = Vec::with_capacity(samples.len());
    let mut covered = 0usize;
    let mut failures = 0usize;

    for s in samples {
        let result = Dataset::from_arrays(&s.y, &s.d, &s.x, s.n_features)
            .and_then(|data| fit(&data));
        match result {
            Ok(r) => {
                if r.covers(theta) {
                    covered += 1;
                }
                estimates.push(r.coefficient);
                std_errors.push(r.std_error);
            }
            Err(e) => {
                warn!(learner = name, error = %e, "replication failed");
                failures += 1;
            }
        }
    }

    let k = estimates.len().max(1) as f64;
    let mean = estimates.iter().sum::<f64>() / k;
    let mse = estimates.iter().map(|e| (e - theta).powi(2)).sum::<f64>() / k;
    let var = estimates.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / (k - 1.0).max(1.0);

    LearnerReport {
        learner: name.to_string(),
        mean_estimate: mean,
        bias: mean - theta,
        rmse: mse.sqrt(),
        empirical_sd: var.sqrt(),
        mean_std_error: std_errors.iter().sum::<f64>() / k,
        coverage: covered as f64 / k,
        failures,
    }
}

type Generator = fn(usize, &mut StdRng) -> Result<Sample, Box<dyn Error>>;

fn run_scenario(
    name: &str,
    notes: &str,
    generate: Generator,
    theta: f64,
    n_obs: usize,
    replications: usize,
    output_dir: &Path,
) -> Result<(), Box<dyn Error>> {
    info!(scenario = name, n_obs, replications, "running scenario");

    let mut rng = StdRng::seed_from_u64(42);
    let samples = (0..replications)
        .map(|_| generate(n_obs, &mut rng))
        .collect::<Result<Vec<_>, _>>()?;

    let n_folds = 5;
    let model = DoubleML::new().n_folds(n_folds).adapter(Batch).build()?;

    let linear = LinearRegression::new();
    let kernel = KernelRegressor::new(30).weight_function(Epanechnikov);
    let learners = vec![
        monte_carlo("linear", &samples, theta, |data| model.fit(data, &linear, &linear)),
        monte_carlo("kernel", &samples, theta, |data| model.fit(data, &kernel, &kernel)),
    ];

    for l in &learners {
        println!(
            "{name:>10} {:>8}  bias {:+.4}  rmse {:.4}  sd {:.4}  se {:.4}  coverage {:.3}",
            l.learner, l.bias, l.rmse, l.empirical_sd, l.mean_std_error, l.coverage
        );
    }

    let report = ScenarioReport {
        name: name.to_string(),
        notes: notes.to_string(),
        true_effect: theta,
        n_obs,
        n_folds,
        replications,
        learners,
    };

    let output_path = output_dir.join(format!("{name}.json"));
    fs::write(output_path, serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let output_dir = Path::new("../output/fastDml");
    fs::create_dir_all(output_dir)?;

    let replications = env::var("DML_VALIDATION_REPS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(200);

    run_scenario(
        "workshop",
        "Two Gaussian confounders, continuous treatment",
        workshop_sample,
        1.0,
        500,
        replications,
        output_dir,
    )?;
    run_scenario(
        "ads",
        "Binary ad tactic confounded by age, prior clicks and device",
        ads_sample,
        0.4,
        2000,
        replications,
        output_dir,
    )?;

    Ok(())
}
