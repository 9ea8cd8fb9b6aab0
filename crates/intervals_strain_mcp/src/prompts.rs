use rmcp::model::{GetPromptResult, PromptMessage, PromptMessageRole};

pub fn strain_pmc_review_prompt(as_of_date: Option<&str>) -> GetPromptResult {
    let as_of = as_of_date.unwrap_or("today");
    GetPromptResult::new(vec![PromptMessage::new_text(
            PromptMessageRole::User,
            format!(
                "Review my strain-based PMC as of {as_of}.\n\nUse get_strain_pmc{} with include_history=true, then cover:\n1. Fitness (CTL), fatigue (ATL) and form (TSB) for the aerobic, glycolytic and neuromuscular systems\n2. Which system is trending up or down over the trajectory\n3. Whether any system is carrying unusual fatigue relative to its fitness\n4. Activities that were skipped for missing dates, if any\n\nKeep the summary short and actionable.",
                as_of_date
                    .map(|d| format!(" (as_of_date={d})"))
                    .unwrap_or_default()
            ),
        )])
    .with_description(format!("Strain-based fitness, fatigue and form as of {as_of}"))
}

pub fn energy_balance_check_prompt(days: u32) -> GetPromptResult {
    GetPromptResult::new(vec![PromptMessage::new_text(
            PromptMessageRole::User,
            format!(
                "Check how my training strain was distributed across energy systems over the last {days} days.\n\nUse get_energy_system_balance with days={days} and get_athlete_settings for CP, W' and Pmax context. Compare each system's share with its target range, explain the status of each system, and turn the recommendations into concrete sessions for the coming week."
            ),
        )])
    .with_description(format!("Energy system balance over the last {days} days"))
}
