//! Scoring Demo
//!
//! Demonstrates the band scorer, breakdown output and session report
//!
//! Run with: cargo run --example scoring_demo

use diascreen::{assess, Assessment, HealthProfile, TelemetryCollector};
use std::sync::Arc;

fn main() {
    println!(
        r#"
    ╔══════════════════════════════════════════════════════════════╗
    ║                                                              ║
    ║   🩺 DIASCREEN SCORING DEMO                                  ║
    ║   Band-Based Threshold Scoring & Session Report              ║
    ║                                                              ║
    ╚══════════════════════════════════════════════════════════════╝
    "#
    );

    let collector = Arc::new(TelemetryCollector::new());

    // ============================================
    // SCORE A FEW REPRESENTATIVE PROFILES
    // ============================================

    let profiles = [
        (
            "Elevated on most factors",
            HealthProfile {
                pregnancies: 6,
                glucose: 148,
                blood_pressure: 72,
                skin_thickness: 35,
                insulin: 0,
                bmi: 33.6,
                diabetes_pedigree: 0.627,
                age: 50,
            },
        ),
        (
            "Every factor below its lowest band",
            HealthProfile {
                pregnancies: 1,
                glucose: 85,
                blood_pressure: 66,
                skin_thickness: 29,
                insulin: 96,
                bmi: 23.3,
                diabetes_pedigree: 0.167,
                age: 21,
            },
        ),
        (
            "Borderline case",
            HealthProfile {
                pregnancies: 3,
                glucose: 102,
                blood_pressure: 76,
                skin_thickness: 37,
                insulin: 90,
                bmi: 32.9,
                diabetes_pedigree: 0.21,
                age: 27,
            },
        ),
    ];

    for (label, profile) in &profiles {
        println!("🔍 {}", label);
        let mut assessment: Assessment = assess(profile).into();
        assessment.latency_ms = 2; // pure scoring, no simulated pause here
        println!("{}", assessment.summary());
        collector.record_assessment(&assessment);
    }

    // ============================================
    // SESSION REPORT
    // ============================================

    println!("{}", collector.generate_session_report());
}
