// Result presentation: summary statistics, terminal rendering and JSON export

use crate::models::{
    AnalysisResult, AnalysisSummary, Lens, LensAssessment, HIGH_CONFIDENCE_THRESHOLD,
};
use anyhow::{anyhow, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Round to three decimal places
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Compute the summary for a validated set of assessments
pub fn summarize(results: &[LensAssessment], stage: &str) -> AnalysisSummary {
    let average_confidence = if results.is_empty() {
        0.0
    } else {
        round3(results.iter().map(|a| a.confidence).sum::<f64>() / results.len() as f64)
    };

    let high_confidence_lenses: Vec<Lens> = results
        .iter()
        .filter(|a| a.confidence > HIGH_CONFIDENCE_THRESHOLD)
        .map(|a| a.lens)
        .collect();

    let top_recommendation = results.iter().min_by_key(|a| a.rank).map(|a| a.lens);

    AnalysisSummary {
        average_confidence,
        high_confidence_lenses,
        top_recommendation,
        stage: stage.to_string(),
    }
}

/// Assemble the final result
pub fn build_result(results: Vec<LensAssessment>, stage: &str) -> AnalysisResult {
    let summary = summarize(&results, stage);
    AnalysisResult { results, summary }
}

/// File name offered for the JSON download
pub fn download_file_name(title: &str) -> String {
    format!("research_lens_analysis_{}.json", title.replace(' ', "_"))
}

/// Pretty JSON for export
pub fn to_pretty_json(result: &AnalysisResult) -> Result<String> {
    serde_json::to_string_pretty(result).map_err(|e| anyhow!("Failed to serialize result: {}", e))
}

/// Write the result as pretty JSON
pub fn write_json(result: &AnalysisResult, path: &Path) -> Result<()> {
    let contents = to_pretty_json(result)?;
    fs::write(path, contents)
        .map_err(|e| anyhow!("Failed to write results to '{}': {}", path.display(), e))?;
    log::info!("Saved analysis to: {}", path.display());
    Ok(())
}

/// Human-readable rendering for the terminal
pub fn render_text(result: &AnalysisResult) -> String {
    let summary = &result.summary;
    let mut out = String::new();

    let top = summary
        .top_recommendation
        .map(|l| l.to_string())
        .unwrap_or_else(|| "-".to_string());
    let high = if summary.high_confidence_lenses.is_empty() {
        "none".to_string()
    } else {
        summary
            .high_confidence_lenses
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let _ = writeln!(out, "Stage:                  {}", summary.stage);
    let _ = writeln!(out, "Top recommendation:     {}", top);
    let _ = writeln!(out, "Average confidence:     {:.3}", summary.average_confidence);
    let _ = writeln!(out, "High-confidence lenses: {}", high);

    let mut ranked: Vec<&LensAssessment> = result.results.iter().collect();
    ranked.sort_by_key(|a| a.rank);

    for a in ranked {
        let _ = writeln!(out);
        let _ = writeln!(out, "#{} {} (confidence {:.2})", a.rank, a.lens, a.confidence);
        let _ = writeln!(out, "  Reason: {}", a.reason);
        if let Some(basis) = &a.confidence_basis {
            let _ = writeln!(out, "  Basis: {}", basis);
        }
        if let Some(relevance) = a.stage_relevance {
            let _ = writeln!(out, "  Stage relevance: {:.2}", relevance);
        }
        for pro in &a.pros {
            let _ = writeln!(out, "  + {}", pro);
        }
        for con in &a.cons {
            let _ = writeln!(out, "  - {}", con);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment(lens: Lens, rank: u8, confidence: f64) -> LensAssessment {
        LensAssessment {
            lens,
            rank,
            reason: format!("{} reason", lens),
            confidence,
            confidence_basis: None,
            pros: vec!["fast".to_string()],
            cons: vec!["small sample".to_string()],
            stage_relevance: Some(0.5),
        }
    }

    fn sample() -> Vec<LensAssessment> {
        vec![
            assessment(Lens::Sme, 2, 0.8),
            assessment(Lens::Peer, 1, 0.9),
            assessment(Lens::Survey, 3, 0.7),
            assessment(Lens::Social, 4, 0.45),
        ]
    }

    #[test]
    fn test_summary_statistics() {
        let summary = summarize(&sample(), "IDEATION & PLANNING");
        assert_eq!(summary.average_confidence, 0.713);
        // 0.7 itself is not above the threshold
        assert_eq!(summary.high_confidence_lenses, vec![Lens::Sme, Lens::Peer]);
        assert_eq!(summary.top_recommendation, Some(Lens::Peer));
        assert_eq!(summary.stage, "IDEATION & PLANNING");
    }

    #[test]
    fn test_summary_json_keys() {
        let result = build_result(sample(), "beta");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["summary"]["top_recommendation"], "Peer");
        assert_eq!(value["summary"]["high_confidence_lenses"][0], "SME");
        assert_eq!(value["results"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_download_file_name() {
        assert_eq!(
            download_file_name("Plant Pal Pro"),
            "research_lens_analysis_Plant_Pal_Pro.json"
        );
    }

    #[test]
    fn test_render_text_orders_by_rank() {
        let text = render_text(&build_result(sample(), "beta"));
        let peer = text.find("#1 Peer").unwrap();
        let sme = text.find("#2 SME").unwrap();
        let social = text.find("#4 Social").unwrap();
        assert!(peer < sme && sme < social);
        assert!(text.contains("Top recommendation:     Peer"));
        assert!(text.contains("Average confidence:     0.713"));
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(download_file_name("PlantPal"));
        let result = build_result(sample(), "beta");
        write_json(&result, &path).unwrap();

        let back: AnalysisResult =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, result);
    }
}
