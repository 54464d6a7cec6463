use log::{debug, info};
use nalgebra::{Matrix2, Vector2};

use fwd::matrix::jacobian;
use fwd::scalar::DualExt;
use fwd::Dual;

fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  // independent variables x = 1 and y = 2, single precision
  let x = Dual::<f32, 2>::seed(0, 1.0);
  let y = Dual::<f32, 2>::seed(1, 2.0);
  debug!("seeded x = {:?}, y = {:?}", x, y);

  // a matrix whose entries are expressions in x and y
  let m = Matrix2::new(x, x + y, x - y, y);

  let a = Vector2::new(x.sin(), y.cos());
  let b = Vector2::new(x.cos(), y.sin());

  // everything below is plain nalgebra, derivatives come along for free
  let val = a.dot(&(m * b));
  info!("a . (A b) = {}", val.value);
  println!("{}", val.gradient);

  // a vector valued result gives its Jacobian directly
  let r = (x * x + y * y).sqrt();
  let angle = (y / x).atan();
  let j = jacobian(&Vector2::new(r, angle));
  info!("r = {}, angle = {}", r.value, angle.value);
  println!("{}", j);
}
