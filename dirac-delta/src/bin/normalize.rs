use dirac_delta::{delta, find_delta_terms, normalize_delta_terms};
use dirac_expr::Expr;

fn main() {
    let n = Expr::symbol("n");
    let expr = Expr::call("f", vec![n.clone()]) * delta(n.clone() - Expr::integer(1))
        + Expr::call("g", vec![n.clone()]) * delta(n.clone())
        + Expr::call("h", vec![n.clone()]) * delta(n.clone() + Expr::integer(1));

    println!("expression: {expr}");
    for term in find_delta_terms(&expr) {
        println!("delta term: {term}");
    }

    let normalized = normalize_delta_terms(&expr, &n).unwrap();
    println!("normalized: {normalized}");
}
