extern crate env_logger;
extern crate ndarray;
extern crate petiole;

use std::env;
use std::time::Instant;
use ndarray::{ArrayD, IxDyn};
use petiole::layer::*;
use petiole::layers::*;
use petiole::session::Session;
use petiole::tensor::Activation;

fn main() {
    env_logger::init();

    let batch_size = match env::args().nth(1).map(|arg| arg.parse::<usize>()) {
        Some(Ok(size)) => size,
        Some(Err(_)) => {
            println!("Sorry, the batch size has to be a number. Default: 32");
            32
        }
        None => {
            println!("No batch size specified. Default: 32");
            32
        }
    };

    let mut config = SequentialConfig::default();
    config.add_input("images", &[None, Some(28), Some(28), Some(1)]);
    config.add_layer(LayerConfig::of_type(TransposeConfig::of_perm(&[0, 3, 1, 2])));
    config.add_layer(LayerConfig::of_type(LayerType::Flatten));
    config.add_layer(LayerConfig::new("drop1", DropoutConfig::with_keep(0.8)));
    config.add_layer(LayerConfig::new("relu1", DenseConfig { activation: Activation::ReLU, ..DenseConfig::of_size(800) }));
    config.add_layer(LayerConfig::new("drop2", DropoutConfig::with_keep(0.5)));
    config.add_layer(LayerConfig::new("output", DenseConfig::of_size(10)));
    config.add_layer(LayerConfig::new("grid", ReshapeConfig::of_shape(&[-1, 2, 5])));

    let model = match Sequential::from_config(&config) {
        Ok(model) => model,
        Err(e) => {
            println!("Could not build the model: {}", e);
            return;
        }
    };
    let output = model.output();
    println!("{}", output);
    output.print_layers();
    output.print_params();

    let data = ArrayD::from_shape_fn(IxDyn(&[batch_size, 28, 28, 1]), |idx| (idx[1] * 28 + idx[2]) as f32 / 784f32);
    let mut session = Session::new();
    for &train in &[true, false] {
        let start = Instant::now();
        match model.forward(&mut session, data.clone(), train) {
            Ok(out) => println!("forward (train: {}) -> {:?} in {:?}", train, out.shape(), start.elapsed()),
            Err(e) => println!("forward (train: {}) failed: {}", train, e),
        }
    }
}
