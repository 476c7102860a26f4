extern crate petiole;
extern crate env_logger;

#[cfg(test)]
mod layer_spec {
    use petiole::Error;
    use petiole::layer::*;
    use petiole::layers::*;
    use petiole::tensor::{placeholder, Activation, TensorShape};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn image_input() -> Layer {
        let x = placeholder("x", TensorShape::new(vec![None, Some(28), Some(28), Some(1)]));
        Layer::input(&x, "input")
    }

    #[test]
    fn flatten_layer() {
        init_logger();
        let input = image_input();
        let net = Layer::from_config(&input, &LayerConfig::new("flatten", LayerType::Flatten)).unwrap();

        assert_eq!("flatten", net.name);
        assert_eq!(Some(input.outputs.clone()), net.inputs);
        assert_eq!("(?, 784)", net.outputs.shape().to_string());
        assert_eq!(Some(784), net.n_units);
        assert_eq!(vec![net.outputs.clone()], net.all_layers);
    }

    #[test]
    fn reshape_layer() {
        init_logger();
        let net = image_input();
        let net = Layer::from_config(&net, &LayerConfig::new("reshape", ReshapeConfig::of_shape(&[-1, 28 * 28]))).unwrap();
        assert_eq!("(?, 784)", net.outputs.shape().to_string());
        assert_eq!("ReshapeLayer", net.type_name());
        assert_eq!(None, net.n_units);
    }

    #[test]
    fn transpose_layer() {
        init_logger();
        let net = image_input();
        let net = Layer::from_config(&net, &LayerConfig::new("transpose", TransposeConfig::of_perm(&[0, 3, 1, 2]))).unwrap();
        assert_eq!("(?, 1, 28, 28)", net.outputs.shape().to_string());
    }

    #[test]
    fn transpose_layer_needs_a_valid_permutation() {
        let net = image_input();
        match Layer::from_config(&net, &LayerConfig::of_type(TransposeConfig::of_perm(&[0, 1]))) {
            Err(Error::InvalidPermutation { ref perm, rank }) => {
                assert_eq!(&vec![0, 1], perm);
                assert_eq!(4, rank);
            }
            other => panic!("expected InvalidPermutation, got {:?}", other),
        }
    }

    #[test]
    fn shape_layers_thread_bookkeeping() {
        init_logger();
        let net = image_input();
        let net = Layer::from_config(&net, &LayerConfig::new("flatten", LayerType::Flatten)).unwrap();
        let net = Layer::from_config(&net, &LayerConfig::new("dense", DenseConfig::of_size(32))).unwrap();
        let net = Layer::from_config(&net, &LayerConfig::new("drop", DropoutConfig::with_keep(0.8))).unwrap();
        let before = net;

        let net = Layer::from_config(&before, &LayerConfig::new("reshape", ReshapeConfig::of_shape(&[-1, 4, 8]))).unwrap();
        let net = Layer::from_config(&net, &LayerConfig::new("transpose", TransposeConfig::of_perm(&[0, 2, 1]))).unwrap();

        assert_eq!(before.all_params, net.all_params);
        assert_eq!(before.all_drop, net.all_drop);
        assert_eq!(before.all_layers.len() + 2, net.all_layers.len());
        assert_eq!(&net.outputs, net.all_layers.last().unwrap());
        assert_eq!("(?, 8, 4)", net.outputs.shape().to_string());
    }

    #[test]
    fn previous_layer_is_not_modified() {
        let input = image_input();
        let flat = Layer::from_config(&input, &LayerConfig::of_type(LayerType::Flatten)).unwrap();
        let dense = Layer::from_config(&flat, &LayerConfig::of_type(DenseConfig::of_size(10))).unwrap();

        assert_eq!(1, flat.all_layers.len());
        assert!(flat.all_params.is_empty());
        assert_eq!(2, dense.all_layers.len());
        assert_eq!(2, dense.all_params.len());
    }

    #[test]
    fn params_and_dropout_accumulate() {
        init_logger();
        let net = image_input();
        let net = Layer::from_config(&net, &LayerConfig::of_type(LayerType::Flatten)).unwrap();
        let net = Layer::from_config(&net, &LayerConfig::new("drop1", DropoutConfig::with_keep(0.8))).unwrap();
        let net = Layer::from_config(&net, &LayerConfig::new("relu1", DenseConfig { activation: Activation::ReLU, ..DenseConfig::of_size(800) })).unwrap();
        let net = Layer::from_config(&net, &LayerConfig::new("drop2", DropoutConfig::with_keep(0.5))).unwrap();
        let net = Layer::from_config(&net, &LayerConfig::new("output", DenseConfig::of_size(10))).unwrap();

        let names: Vec<&str> = net.all_params.iter().map(|p| p.name()).collect();
        assert_eq!(vec!["relu1/W", "relu1/b", "output/W", "output/b"], names);
        let keeps: Vec<f32> = net.all_drop.values().cloned().collect();
        assert_eq!(vec![0.8f32, 0.5f32], keeps);
        assert_eq!(784 * 800 + 800 + 800 * 10 + 10, net.count_params().unwrap());
        assert_eq!(5, net.all_layers.len());

        net.print_layers();
        net.print_params();
    }

    #[test]
    fn disabled_dropout_is_not_recorded() {
        let net = image_input();
        let net = Layer::from_config(&net, &LayerConfig::of_type(LayerType::Flatten)).unwrap();
        let config = DropoutConfig { is_train: false, ..DropoutConfig::default() };
        let dropped = Layer::from_config(&net, &LayerConfig::of_type(config)).unwrap();

        assert_eq!(net.outputs, dropped.outputs);
        assert_eq!(net.all_layers, dropped.all_layers);
        assert!(dropped.all_drop.is_empty());
    }

    #[test]
    fn sequential_container() {
        init_logger();
        let mut config = SequentialConfig::default();
        config.add_input("data", &[None, Some(28), Some(28), Some(1)]);
        config.add_layer(LayerConfig::of_type(LayerType::Flatten));
        config.add_layer(LayerConfig::new("hidden", DenseConfig::of_size(16)));
        config.add_layer(LayerConfig::of_type(DropoutConfig::default()));
        config.add_layer(LayerConfig::of_type(ReshapeConfig::of_shape(&[-1, 4, 4])));
        config.add_layer(LayerConfig::of_type(TransposeConfig::of_perm(&[0, 2, 1])));
        let model = Sequential::from_config(&config).unwrap();

        let output = model.output();
        assert_eq!("transpose", output.name);
        assert_eq!("(?, 4, 4)", output.outputs.shape().to_string());
        assert_eq!(5, output.all_layers.len());
        assert_eq!(2, output.all_params.len());
        assert_eq!(1, output.all_drop.len());
    }

    #[test]
    fn sequential_rejects_duplicate_names() {
        let mut config = SequentialConfig::default();
        config.add_input("data", &[None, Some(4)]);
        config.add_layer(LayerConfig::new("shape", ReshapeConfig::of_shape(&[-1, 2, 2])));
        config.add_layer(LayerConfig::new("shape", ReshapeConfig::of_shape(&[-1, 4])));
        match Sequential::from_config(&config) {
            Err(Error::DuplicateLayerName(ref name)) => assert_eq!("shape", name),
            other => panic!("expected DuplicateLayerName, got {:?}", other),
        }
    }
}
