use decimal_vector::{DecimalContext, Vector};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Exact Decimal Vector Demo");
    println!("=========================\n");

    let v = Vector::new(["8.218", "-9.341"])?;
    let w = Vector::new(["-1.129", "2.111"])?;
    println!("v = {}", v);
    println!("w = {}", w);
    println!("v + w = {}", v.plus(&w)?);
    println!("v - w = {}", v.minus(&w)?);
    println!("v * 7.41 = {}", v.mult_scalar("7.41")?);

    println!("\n|v| = {}", v.magnitude());
    println!("v / |v| = {}", v.normalized()?);
    println!("v . w = {}", v.dot(&w)?);
    println!(
        "angle(v, w) = {:.6} rad = {:.4} deg",
        v.angle_with(&w, false)?,
        v.angle_with(&w, true)?
    );

    let a = Vector::new(["-7.579", "-7.88"])?;
    let b = Vector::new(["22.737", "23.64"])?;
    println!("\n{} parallel to {}: {}", a, b, a.is_parallel_to(&b)?);
    println!("{} orthogonal to {}: {}", a, b, a.is_orthogonal_to(&b)?);

    let zero = Vector::zeros(2)?;
    match zero.normalized() {
        Ok(_) => println!("\nunexpectedly normalized the zero vector"),
        Err(e) => println!("\nnormalizing {}: {}", zero, e),
    }

    let context = DecimalContext::from_json(r#"{"precision": 50}"#)?;
    let third = Vector::with_context([1, 1, 1], context)?.normalized()?;
    println!("\nat precision {}: {}", context.precision(), third);

    Ok(())
}
