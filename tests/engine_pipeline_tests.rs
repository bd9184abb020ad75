mod common;

use common::{batch_of, Recorder, SharedBuffer};
use streamblocks::blocks::{Filter, Median, Predicate, Print, Sum, TumblingWindow};
use streamblocks::engine::{Pipeline, RunOutcome};
use streamblocks::Container;

fn standard_pipeline(buffer: &SharedBuffer) -> Pipeline {
    Pipeline::builder()
        .block(Filter::new(Predicate::Gt(0.0)))
        .block(TumblingWindow::new(2).unwrap())
        .block(Sum)
        .block(TumblingWindow::new(3).unwrap())
        .block(Median)
        .block(Print::with_writer(buffer.clone()))
        .build()
}

#[tokio::test]
async fn test_end_to_end_median_of_sums() {
    let buffer = SharedBuffer::default();
    let mut pipeline = standard_pipeline(&buffer);

    // -1 is dropped by the filter; pairs (1,2) and (3,4) give sums 3 and 7
    for v in [1.0, 2.0, 3.0, -1.0, 4.0, 5.0] {
        let report = pipeline.push(Container::scalar(v)).await.unwrap();
        assert!(report.is_swallowed());
    }
    assert!(buffer.contents().is_empty());

    // (5,6) gives the third sum, 11; median of [3, 7, 11]
    let report = pipeline.push(Container::scalar(6.0)).await.unwrap();
    assert_eq!(report.emitted(), Some(&Container::scalar(7.0)));
    assert_eq!(buffer.lines(), vec!["7"]);

    // (7,8) opens a new window of sums
    for v in [7.0, 8.0] {
        assert!(pipeline.push(Container::scalar(v)).await.unwrap().is_swallowed());
    }
    assert_eq!(buffer.lines(), vec!["7"]);
}

#[tokio::test]
async fn test_swallow_stops_the_run() {
    let recorder = Recorder::default();
    let mut pipeline = Pipeline::builder()
        .named_block("positive", Filter::new(Predicate::Gt(0.0)))
        .named_block("after", recorder.clone())
        .build();

    let report = pipeline.push(Container::scalar(-5.0)).await.unwrap();
    assert_eq!(
        report.outcome,
        RunOutcome::Swallowed {
            stage: "positive".to_string()
        }
    );
    assert!(recorder.seen().is_empty());

    // the next event starts again from the first stage
    let report = pipeline.push(Container::scalar(5.0)).await.unwrap();
    assert_eq!(report.emitted(), Some(&Container::scalar(5.0)));
    assert_eq!(recorder.seen(), vec![Container::scalar(5.0)]);
}

#[tokio::test]
async fn test_swallow_does_not_touch_later_window_state() {
    let recorder = Recorder::default();
    let mut pipeline = Pipeline::builder()
        .block(Filter::new(Predicate::Gt(0.0)))
        .block(TumblingWindow::new(2).unwrap())
        .block(recorder.clone())
        .build();

    pipeline.push(Container::scalar(1.0)).await.unwrap();
    pipeline.push(Container::scalar(-1.0)).await.unwrap();
    pipeline.push(Container::scalar(-2.0)).await.unwrap();
    let report = pipeline.push(Container::scalar(2.0)).await.unwrap();

    assert_eq!(report.emitted(), Some(&batch_of(&[1.0, 2.0])));
    assert_eq!(recorder.seen(), vec![batch_of(&[1.0, 2.0])]);
}

#[tokio::test]
async fn test_independent_pipelines() {
    let first = SharedBuffer::default();
    let second = SharedBuffer::default();
    let mut a = standard_pipeline(&first);
    let mut b = standard_pipeline(&second);

    for v in 1..=6 {
        a.push(Container::scalar(v as f64)).await.unwrap();
    }
    for v in 1..=5 {
        b.push(Container::scalar(v as f64)).await.unwrap();
    }

    assert_eq!(first.lines(), vec!["7"]);
    assert!(second.contents().is_empty());
}

#[tokio::test]
async fn test_empty_pipeline_emits_input() {
    let mut pipeline = Pipeline::builder().build();
    assert!(pipeline.is_empty());

    let report = pipeline.push(Container::scalar(1.0)).await.unwrap();
    assert_eq!(report.outcome, RunOutcome::Emitted(Container::scalar(1.0)));
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn test_default_stage_ids() {
    let pipeline = Pipeline::builder()
        .block(Filter::new(Predicate::Gt(0.0)))
        .block(TumblingWindow::new(2).unwrap())
        .named_block("total", Sum)
        .build();

    assert_eq!(pipeline.len(), 3);
    assert_eq!(pipeline.stage_ids(), vec!["filter_0", "tumblingwindow_1", "total"]);
}

#[tokio::test]
async fn test_pipeline_from_json() {
    let config = serde_json::json!({
        "blocks": [
            {"type": "filter", "config": {"predicate": {"gt": 0.0}}},
            {"type": "window", "config": {"size": 2}},
            {"id": "total", "type": "sum"}
        ]
    });

    let mut pipeline = Pipeline::from_json(config).await.unwrap();
    assert_eq!(pipeline.stage_ids(), vec!["filter_0", "window_1", "total"]);

    assert!(pipeline.push(Container::scalar(2.0)).await.unwrap().is_swallowed());
    let report = pipeline.push(Container::scalar(3.0)).await.unwrap();
    assert_eq!(report.emitted(), Some(&Container::scalar(5.0)));
}

#[tokio::test]
async fn test_pipeline_from_json_unknown_type() {
    let config = serde_json::json!({"blocks": [{"type": "average"}]});
    let err = Pipeline::from_json(config).await.err().unwrap();
    assert!(err.to_string().contains("unknown block type: average"));
}

#[tokio::test]
async fn test_pipeline_from_json_invalid_parameter() {
    let config = serde_json::json!({"blocks": [{"id": "w", "type": "window", "config": {"size": 0}}]});
    let err = Pipeline::from_json(config).await.err().unwrap();
    assert!(err.to_string().starts_with("block w:"), "{}", err);
}
