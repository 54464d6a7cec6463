use log::{debug, info};

use fwd::scalar::DualExt;
use fwd::{gradient, Dual};

// y = a * exp(-k t) + c, the three parameters are the variables
fn model(params: &[Dual<f64, 3>; 3], t: f64) -> Dual<f64, 3> {
  let [a, k, c] = *params;
  a * (-(k * t)).exp() + c
}

fn mean_squared_error(params: [Dual<f64, 3>; 3], samples: &[(f64, f64)]) -> Dual<f64, 3> {
  let total: Dual<f64, 3> = samples
    .iter()
    .map(|&(t, y)| {
      let err = model(&params, t) - y;
      err * err
    })
    .sum();
  total / samples.len() as f64
}

fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  // synthetic decay curve with a = 2.5, k = 0.8, c = 0.3
  let samples: Vec<(f64, f64)> = (0..20)
    .map(|i| {
      let t = i as f64 * 0.25;
      (t, 2.5 * (-0.8 * t).exp() + 0.3)
    })
    .collect();

  let learning_rate = 0.1;
  let epochs = 20000;

  let mut params = [1.0, 0.1, 0.0];
  for epoch in 0..epochs {
    // one forward pass gives the loss and all three partials
    let (loss, grad) = gradient(|p| mean_squared_error(p, &samples), params);
    for (p, g) in params.iter_mut().zip(grad.iter()) {
      *p -= learning_rate * g;
    }

    if epoch % 2000 == 0 {
      debug!(
        "epoch {} | MSE = {:.6} | a = {:.4} | k = {:.4} | c = {:.4}",
        epoch, loss, params[0], params[1], params[2]
      );
    }
  }

  let (loss, _) = gradient(|p| mean_squared_error(p, &samples), params);
  info!("final MSE = {:e}", loss);
  println!(
    "a = {:.4}, k = {:.4}, c = {:.4}",
    params[0], params[1], params[2]
  );
}
