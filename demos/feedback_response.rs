//! End-to-end pipeline: a second-order feedback graph, its symbolic
//! transfer function, poles, residues, and sampled impulse response.
//!
//! The graph models `T(s) = 1 / (s² + 3s + 2)` as a chain of two
//! integrator sections (gain `1/s`) with unity forward entry and two
//! feedback returns of -3 and -2.

use sfg_analysis::prelude::*;

fn main() -> Result<(), SfgError> {
    // Symbolic side: the structure and its gain formula.
    let mut graph = Graph::new();
    let mut pool = ExprPool::new();
    let input = graph.add_node("u")?;
    let mid = graph.add_node("x1")?;
    let output = graph.add_node("x2")?;
    graph.add_variable_edge(input, mid, &mut pool)?;
    graph.add_variable_edge(mid, output, &mut pool)?;
    graph.add_variable_edge(output, mid, &mut pool)?;
    graph.add_variable_edge(output, output, &mut pool)?;

    let paths = find_forward_paths(&graph, input, output)?;
    let loops = find_loops(&graph)?;
    println!(
        "{} forward path(s), {} loop(s)",
        paths.len(),
        loops.len()
    );

    let tf = calc_expr(&graph, &mut pool, input, output)?;
    println!("numerator   = {}", pool.format(tf.numerator));
    println!("denominator = {}", pool.format(tf.denominator));

    // Numeric side: N(s)/D(s) = 1 / (s² + 3s + 2) = 1 / ((s + 1)(s + 2)).
    let numerator = CPoly::from_real(&[1.0]);
    let mut denominator = CPoly::from_real(&[2.0, 3.0, 1.0]);
    let scale = denominator.make_monic();
    println!("denominator scale divided out: {}", scale.re);

    let (poles, report) = find_roots(&denominator, &RootFinderConfig::default());
    println!(
        "poles after {} iteration(s), converged = {}:",
        report.iterations, report.converged
    );
    for pole in &poles {
        println!("  {:.6} {:+.6}i", pole.re, pole.im);
    }

    let terms = partial_fractions(&numerator, &poles, 0.0);
    for term in &terms {
        println!(
            "  A = {:.6} {:+.6}i at p = {:.6} {:+.6}i, power {}",
            term.residue.re, term.residue.im, term.pole.re, term.pole.im, term.power
        );
    }

    // Impulse response e^{-t} - e^{-2t}, sampled and printed as CSV.
    let waveform = sample_response(&terms, 2.0, 0.25);
    let mut csv = Vec::new();
    write_response_csv(&mut csv, &waveform).expect("in-memory write");
    print!("{}", String::from_utf8_lossy(&csv));
    Ok(())
}
