use rust_perceptron::config::{load_config, EngineConfig};
use rust_perceptron::layers::{Neuron, NeuronParams};
use rust_perceptron::perceptron::Perceptron;
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

// Walkthrough of the perceptron engine: one neuron, then a one-layer network
// scored and backpropagated against a fixed target.
// Usage: perceptron_demo [config.json]
const NEURON_INPUT: [f64; 5] = [0.1, 0.2, 0.0, 1.0, 0.01];
const NEURON_WEIGHTS: [f64; 5] = [1.0, 4.0, 1.0, 0.15, 67.0];
const NETWORK_INPUT: [f64; 4] = [0.1, 0.2, 0.0, 1.0];
const EXPECTED_OUTPUT: [f64; 3] = [0.1, 0.1, 0.5];

fn print_separation_line() {
    println!("############################################################");
}

// Format a vector as "[a,b,c]" with fixed precision.
// Adding 0.0 turns -0.0 into 0.0 so untouched gradient slots print unsigned.
fn format_vec(data: &[f64]) -> String {
    let items: Vec<String> = data
        .iter()
        .map(|value| format!("{:.6}", value + 0.0))
        .collect();
    format!("[{}]", items.join(","))
}

fn format_nested(data: &[Vec<f64>]) -> String {
    let items: Vec<String> = data.iter().map(|row| format_vec(row)).collect();
    format!("[{}]", items.join(", "))
}

fn format_params(params: &[NeuronParams]) -> String {
    let items: Vec<String> = params
        .iter()
        .map(|p| format!("(th = {:.6}, {})", p.theta, format_vec(&p.weights)))
        .collect();
    format!("{{ {} }}", items.join(", "))
}

// Load the engine config from the first argument, or fall back to defaults.
fn config_from_args(args: &[String]) -> EngineConfig {
    match args.get(1) {
        Some(path) => load_config(path).unwrap_or_else(|err| {
            eprintln!("Failed to load config {path}: {err}");
            process::exit(1);
        }),
        None => EngineConfig::default(),
    }
}

fn demo_neuron(config: &EngineConfig) -> rust_perceptron::Result<()> {
    println!(
        "creating a test neuron with weights : {}",
        format_vec(&NEURON_WEIGHTS)
    );
    let neuron = Neuron::new(NEURON_WEIGHTS.to_vec(), 0.0);
    println!("testing neuron with the input of : {}", format_vec(&NEURON_INPUT));
    println!(
        "neuron process result is : {:.6}",
        neuron.process(&NEURON_INPUT, config.phi)?
    );
    Ok(())
}

fn demo_single_layer(config: &EngineConfig) -> rust_perceptron::Result<()> {
    let params = vec![
        NeuronParams::new(vec![0.1, 0.5, 2.0, 0.04], 0.0),
        NeuronParams::new(vec![0.1, 0.5, 2.0, 0.1], 0.0),
        NeuronParams::new(vec![0.4, 0.1, 5.0, 0.07], 0.0),
    ];
    println!("creating perceptron with this layer : \n\t{}", format_params(&params));
    let network = Perceptron::from_config(config, vec![params])?;
    println!("perceptron created ({:?} gradients)", network.gradient_mode());

    println!("testing evaluate with the input of : {}", format_vec(&NETWORK_INPUT));
    let output = network.evaluate(&NETWORK_INPUT)?;
    println!("output is : {}", format_vec(&output));

    print_separation_line();
    println!(
        "testing total_error with the same input and expected output of : {}",
        format_vec(&EXPECTED_OUTPUT)
    );
    let report = network.total_error(&NETWORK_INPUT, &EXPECTED_OUTPUT)?;
    println!(
        "total error is {:.6} and the partial errors are : {}",
        report.total,
        format_vec(&report.per_output)
    );

    print_separation_line();
    println!("testing total_error_and_gradients with the same input and expected output");
    let report = network.total_error_and_gradients(&NETWORK_INPUT, &EXPECTED_OUTPUT)?;
    println!("total error is : {:.6}", report.total);
    println!(
        "output has {} layers and its print out is : \n\t{}",
        report.layer_outputs.len(),
        format_nested(&report.layer_outputs)
    );
    println!("partial errors are : {}", format_vec(&report.per_output));
    for (index, layer) in report.gradients.iter().enumerate() {
        println!("error gradients of layer {index} are : {}", format_nested(layer));
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let config = config_from_args(&args);

    let result = demo_neuron(&config).and_then(|()| {
        print_separation_line();
        print_separation_line();
        demo_single_layer(&config)
    });

    if let Err(err) = result {
        eprintln!("Demo failed: {err}");
        process::exit(1);
    }
}
