use std::sync::Arc;

use emotext::{
    analyze, load_model, present, BarChart, ChartConfig, ClassifierConfig, ClassifierError,
    ClassifierMode, EmotionModel, PipelineError, LEXICON_LABELS,
};

fn lexicon_config() -> ClassifierConfig {
    ClassifierConfig {
        mode: ClassifierMode::Lexicon,
        model_name: "keywords".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn text_to_display_payload() {
    let model = load_model(&lexicon_config()).await.unwrap();
    assert_eq!(model.name(), "keywords");

    let analysis = analyze(model.as_ref(), "I am furious").await.unwrap();
    assert_eq!(analysis.label(), "anger");
    assert_eq!(analysis.emoji, "😠");
    assert!(analysis.confidence > 1.0 / LEXICON_LABELS.len() as f32);

    let chart = BarChart::new(ChartConfig::default());
    let payload = present(analysis, &chart).unwrap();
    assert_eq!(payload.text, "I am furious");
    assert!(payload.chart_html.contains(r#""width":500"#));
    assert!(payload.chart_html.contains(r#""height":300"#));
    for label in LEXICON_LABELS {
        assert!(payload.chart_html.contains(label));
    }
}

#[tokio::test]
async fn confidence_is_the_maximum_probability() {
    let model = load_model(&lexicon_config()).await.unwrap();
    let analysis = analyze(model.as_ref(), "so sad and lonely").await.unwrap();

    let max = analysis
        .probabilities()
        .iter()
        .map(|(_, p)| p)
        .fold(f32::MIN, f32::max);
    assert_eq!(analysis.confidence, max);
    assert_eq!(analysis.probabilities().get(analysis.label()), Some(max));
}

#[tokio::test]
async fn shared_model_serves_concurrent_callers() {
    let model: Arc<dyn EmotionModel> = load_model(&lexicon_config()).await.unwrap();

    let mut tasks = Vec::new();
    for text in ["I am so happy today", "I am furious", "I am scared"] {
        for _ in 0..8 {
            let model = Arc::clone(&model);
            tasks.push(tokio::spawn(async move {
                analyze(model.as_ref(), text).await.map(|a| (text, a.label().to_string()))
            }));
        }
    }

    for task in tasks {
        let (text, label) = task.await.unwrap().unwrap();
        let expected = match text {
            "I am so happy today" => "joy",
            "I am furious" => "anger",
            _ => "fear",
        };
        assert_eq!(label, expected);
    }
}

#[tokio::test]
async fn missing_model_file_fails_to_load() {
    let cfg = ClassifierConfig {
        mode: ClassifierMode::Onnx,
        model_path: "definitely/not/here/model.onnx".into(),
        model_url: None,
        ..Default::default()
    };

    let err = match load_model(&cfg).await {
        Ok(_) => panic!("loading a missing model should fail"),
        Err(err) => err,
    };
    assert!(err.is_load_error());
    assert!(matches!(err, ClassifierError::ModelNotFound(_)));

    let wrapped = PipelineError::from(err);
    assert!(wrapped.to_string().contains("classification failed"));
}
