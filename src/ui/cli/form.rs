use crate::core::FeatureSchema;
use crate::core::attributes::Attribute;
use crate::predictor::{DiseasePredictor, FeatureInput, FeatureValue};
use crate::ui::cli::drivers::PromptDriver;
use anyhow::Result;
use std::collections::HashMap;

const FEATURE_HELP: &str = "Leave blank if not measured; the training mean is used instead";

/// Asks for every schema feature in order. Blank answers leave the feature
/// out of the returned map.
pub fn prompt_features<D: PromptDriver>(driver: &D, schema: &FeatureSchema) -> Result<FeatureInput> {
    let mut values = HashMap::new();
    for attr in schema.attributes() {
        if let Some(x) = driver.ask_optional_f64(attr.name(), FEATURE_HELP, Some(0.0))? {
            values.insert(attr.name().to_string(), FeatureValue::Number(x));
        }
    }
    Ok(FeatureInput::Map(values))
}

/// Interactive loop: fill a panel, print the predicted disease, repeat until
/// the user declines.
pub fn run_prediction_form<D: PromptDriver>(driver: &D, predictor: &DiseasePredictor) -> Result<()> {
    loop {
        let input = prompt_features(driver, predictor.schema())?;
        let entered = match &input {
            FeatureInput::Map(m) => m.len(),
            FeatureInput::Vector(v) => v.len(),
        };
        match predictor.predict(&input) {
            Ok(label) => println!(
                "Predicted disease: {label}  ({entered}/{} features entered)",
                predictor.schema().len()
            ),
            Err(err) => eprintln!("✗ {err}"),
        }
        if predictor.health().is_degraded() {
            eprintln!("! serving the fallback model; predictions carry no clinical meaning");
        }
        if !driver.ask_bool("Predict another sample?", "", false)? {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedDriver;

    #[test]
    fn blank_answers_are_left_out() {
        let schema = FeatureSchema::new(["Glucose", "HbA1c", "ALT"]);
        let driver = ScriptedDriver::new(["250", "", "31.5"]);
        let input = prompt_features(&driver, &schema).unwrap();
        let FeatureInput::Map(m) = input else {
            panic!("expected a map");
        };
        assert_eq!(m.len(), 2);
        assert_eq!(m["Glucose"], FeatureValue::Number(250.0));
        assert_eq!(m["ALT"], FeatureValue::Number(31.5));
        assert!(!m.contains_key("HbA1c"));
    }

    #[test]
    fn script_running_out_is_an_error() {
        let schema = FeatureSchema::new(["Glucose", "HbA1c"]);
        let driver = ScriptedDriver::new(["1"]);
        assert!(prompt_features(&driver, &schema).is_err());
    }

    #[test]
    fn form_loop_stops_when_declined() {
        use crate::pipeline::{PipelineConfig, dummy_bundle};
        use std::sync::Arc;

        let schema = FeatureSchema::blood_panel();
        let predictor = DiseasePredictor::with_bundle(
            PipelineConfig::default(),
            Arc::new(dummy_bundle(&schema).unwrap()),
        );
        let mut script = vec![""; 2 * schema.len() + 2];
        script[schema.len()] = "y";
        script[2 * schema.len() + 1] = "n";
        let driver = ScriptedDriver::new(script);
        run_prediction_form(&driver, &predictor).unwrap();
        assert_eq!(driver.remaining(), 0);
    }
}
