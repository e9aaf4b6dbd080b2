//! End-to-end exporter tests: a simulated training loop drives the exporter
//! through `CallbackManager` and a recording gateway client.

use std::sync::{Arc, Mutex};

use prometheus::TextEncoder;

use pasarela::buckets::WEIGHT_BUCKETS_1_0;
use pasarela::{
    CallbackManager, ConsoleCallback, Drift, ExporterConfig, GatewayPush, HookContext,
    InferenceExporter, MetricLogs, PasarelaError, Result, TrainCallback, TrainTestExporter,
    WeightSnapshot,
};

/// Gateway double that records every push as exposition text.
#[derive(Clone, Default)]
struct RecordingGateway {
    pushes: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingGateway {
    fn bodies(&self) -> Vec<String> {
        self.pushes.lock().unwrap().iter().map(|(_, body)| body.clone()).collect()
    }

    fn len(&self) -> usize {
        self.pushes.lock().unwrap().len()
    }
}

impl GatewayPush for RecordingGateway {
    fn push(&self, job: &str, families: Vec<prometheus::proto::MetricFamily>) -> Result<()> {
        let body = TextEncoder::new()
            .encode_to_string(&families)
            .map_err(PasarelaError::from)?;
        self.pushes.lock().unwrap().push((job.to_string(), body));
        Ok(())
    }
}

fn mnist_like_model() -> WeightSnapshot {
    WeightSnapshot::from_tensors(vec![
        vec![0.05, -0.12, 0.33, -0.48],
        vec![0.91, -0.07],
    ])
    .with_parameter_count(104_202)
}

fn epoch_logs(epoch: usize) -> MetricLogs {
    let mut logs = MetricLogs::new();
    logs.insert("loss".to_string(), 1.0 / (epoch + 1) as f64);
    logs.insert("accuracy".to_string(), 0.7 + 0.05 * epoch as f64);
    logs
}

#[test]
fn training_run_pushes_each_epoch_and_final_histogram() {
    let gateway = RecordingGateway::default();
    let config = ExporterConfig::new("127.0.0.1:9091", "mnist")
        .with_weight_buckets(&WEIGHT_BUCKETS_1_0);
    let exporter = TrainTestExporter::with_client(config, Box::new(gateway.clone())).unwrap();

    let mut manager = CallbackManager::new();
    manager.add(ConsoleCallback::new());
    manager.add(exporter);

    let model = mnist_like_model();
    let empty = MetricLogs::new();

    manager.on_train_begin(&HookContext::new(0, &empty, &model)).unwrap();
    for epoch in 0..3 {
        let logs = epoch_logs(epoch);
        manager.on_epoch_end(&HookContext::new(epoch, &logs, &model)).unwrap();
    }
    manager.on_train_end(&HookContext::new(2, &empty, &model)).unwrap();

    // One push per epoch plus the histogram push.
    assert_eq!(gateway.len(), 4);

    let bodies = gateway.bodies();
    assert!(bodies[0].contains("pasarela_train_loss 1"));
    assert!(bodies[2].contains("pasarela_train_epochs_count 3"));
    assert!(bodies[2].contains("pasarela_train_model_parameters_count 104202"));
    assert!(bodies[2].contains("pasarela_train_accuracy"));

    // Final push buckets all six trainable weights.
    assert!(bodies[3].contains("pasarela_train_model_weights_count 6"));
    assert!(bodies[3].contains("pasarela_train_model_weights_bucket"));
}

#[test]
fn evaluation_run_pushes_once() {
    let gateway = RecordingGateway::default();
    let config = ExporterConfig::new("127.0.0.1:9091", "mnist-eval");
    let exporter = TrainTestExporter::with_client(config, Box::new(gateway.clone())).unwrap();

    let mut manager = CallbackManager::new();
    manager.add(exporter);

    let model = mnist_like_model();
    let mut logs = MetricLogs::new();
    logs.insert("loss".to_string(), 0.21);
    logs.insert("accuracy".to_string(), 0.93);

    manager.on_test_begin(&HookContext::new(0, &logs, &model)).unwrap();
    manager.on_test_end(&HookContext::new(0, &logs, &model)).unwrap();

    assert_eq!(gateway.len(), 1);
    let body = &gateway.bodies()[0];
    assert!(body.contains("pasarela_test_loss 0.21"));
    assert!(body.contains("pasarela_test_accuracy 0.93"));
    assert!(body.contains("pasarela_test_model_parameters_count 104202"));
    // No buckets configured, so no weight histogram.
    assert!(!body.contains("pasarela_test_model_weights"));
}

#[test]
fn finished_exporter_rejects_a_second_run() {
    let gateway = RecordingGateway::default();
    let config = ExporterConfig::new("127.0.0.1:9091", "mnist").propagate_errors();
    let mut exporter =
        TrainTestExporter::with_client(config, Box::new(gateway.clone())).unwrap();

    let model = mnist_like_model();
    let empty = MetricLogs::new();
    let ctx = HookContext::new(0, &empty, &model);

    exporter.on_train_begin(&ctx).unwrap();
    exporter.on_train_end(&ctx).unwrap();

    assert!(matches!(exporter.on_train_begin(&ctx), Err(PasarelaError::RunExhausted)));
}

#[test]
fn swallowed_failures_do_not_stop_the_loop() {
    struct DeadGateway;
    impl GatewayPush for DeadGateway {
        fn push(&self, _: &str, _: Vec<prometheus::proto::MetricFamily>) -> Result<()> {
            Err(PasarelaError::Push {
                gateway: "dead:9091".into(),
                source: prometheus::Error::Msg("connection refused".into()),
            })
        }
    }

    let config = ExporterConfig::new("dead:9091", "mnist");
    let exporter = TrainTestExporter::with_client(config, Box::new(DeadGateway)).unwrap();

    let mut manager = CallbackManager::new();
    manager.add(exporter);

    let model = mnist_like_model();
    let empty = MetricLogs::new();
    manager.on_train_begin(&HookContext::new(0, &empty, &model)).unwrap();
    for epoch in 0..5 {
        let logs = epoch_logs(epoch);
        assert!(manager.on_epoch_end(&HookContext::new(epoch, &logs, &model)).is_ok());
    }
    manager.on_train_end(&HookContext::new(4, &empty, &model)).unwrap();
}

#[test]
fn inference_exporter_pushes_prediction_and_drift_metrics() {
    let gateway = RecordingGateway::default();
    let exporter = InferenceExporter::new().unwrap();

    for batch in [1usize, 8, 3] {
        exporter.observe(batch, || batch * 2);
    }
    exporter.observe_drift(&Drift { detected: 1, test_statistic: Some(2.25) });

    exporter.push_to("serving", &gateway).unwrap();

    assert_eq!(gateway.len(), 1);
    let body = &gateway.bodies()[0];
    assert!(body.contains("pasarela_predict_requests_total 3"));
    assert!(body.contains("pasarela_predict_samples_total 12"));
    assert!(body.contains("pasarela_drift_detected_total 1"));
    assert!(body.contains("pasarela_drift_test_statistic 2.25"));
}
