use std::sync::Arc;

use rmcp::Json;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    GetPromptRequestParams, GetPromptResult, ListPromptsResult, PaginatedRequestParams,
};
use rmcp::service::RequestContext;
use rmcp::RoleServer;
use rmcp::{prompt, prompt_handler, prompt_router, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use intervals_strain_client::IntervalsClient;

pub mod domains;
pub mod error;
pub mod logging;
mod prompts;
pub mod services;
pub mod types;

pub use error::{McpError, McpResult, StrainError};
pub use services::StrainService;
pub use types::*;

#[derive(Clone)]
pub struct StrainMcpHandler {
    service: StrainService,
    tool_router: rmcp::handler::server::tool::ToolRouter<StrainMcpHandler>,
    prompt_router: rmcp::handler::server::router::prompt::PromptRouter<StrainMcpHandler>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct StrainPmcReviewParams {
    /// Reference date (YYYY-MM-DD, default: today)
    pub as_of_date: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct EnergyBalanceCheckParams {
    /// Window length in days (default: 14)
    pub days: Option<u32>,
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

#[tool_router]
#[prompt_router]
impl StrainMcpHandler {
    pub fn new(client: Arc<dyn IntervalsClient>) -> Self {
        Self {
            service: StrainService::new(client),
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    pub fn tool_count(&self) -> usize {
        self.tool_router.list_all().len()
    }

    pub fn prompt_count(&self) -> usize {
        self.prompt_router.list_all().len()
    }

    #[tool(
        name = "get_strain_pmc",
        description = "Strain-based fitness (CTL), fatigue (ATL) and form (TSB) for the aerobic, glycolytic and neuromuscular energy systems"
    )]
    async fn get_strain_pmc(
        &self,
        params: Parameters<StrainPmcParams>,
    ) -> Result<Json<StrainPmcReport>, String> {
        let report = self.service.strain_pmc(params.0, today()).await?;
        Ok(Json(report))
    }

    #[tool(
        name = "get_energy_system_balance",
        description = "Distribution of strain across energy systems over a date window, with target assessment and recommendations"
    )]
    async fn get_energy_system_balance(
        &self,
        params: Parameters<BalanceParams>,
    ) -> Result<Json<EnergyBalanceReport>, String> {
        let report = self.service.energy_balance(params.0, today()).await?;
        Ok(Json(report))
    }

    #[tool(
        name = "get_power_curve",
        description = "Best power per duration (watts and W/kg) for an activity type and period"
    )]
    async fn get_power_curve(
        &self,
        params: Parameters<PowerCurveParams>,
    ) -> Result<Json<PowerCurveReport>, String> {
        let report = self.service.power_curve(params.0).await?;
        Ok(Json(report))
    }

    #[tool(
        name = "get_athlete_settings",
        description = "Athlete profile merged with the sport settings (CP, W', Pmax, FTP, zones) for a sport type"
    )]
    async fn get_athlete_settings(
        &self,
        params: Parameters<SportTypeParam>,
    ) -> Result<Json<ObjectResult>, String> {
        let result = self.service.athlete_settings(params.0).await?;
        Ok(Json(result))
    }

    /// Fitness/fatigue/form review per energy system
    #[prompt(
        name = "strain-pmc-review",
        description = "Review strain-based fitness, fatigue and form per energy system"
    )]
    async fn strain_pmc_review(&self, params: Parameters<StrainPmcReviewParams>) -> GetPromptResult {
        prompts::strain_pmc_review_prompt(params.0.as_of_date.as_deref())
    }

    #[prompt(
        name = "energy-balance-check",
        description = "Check the strain distribution across energy systems against targets"
    )]
    async fn energy_balance_check(
        &self,
        params: Parameters<EnergyBalanceCheckParams>,
    ) -> GetPromptResult {
        let days = params.0.days.unwrap_or(services::DEFAULT_BALANCE_DAYS);
        prompts::energy_balance_check_prompt(days)
    }
}

#[tool_handler]
#[prompt_handler(router = self.prompt_router)]
impl rmcp::ServerHandler for StrainMcpHandler {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo::new(
            rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
        )
        .with_instructions(
            "Intervals.icu strain analytics - strain-based PMC per energy system, \
             energy system balance, power curves and athlete settings.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use intervals_strain_client::{IntervalsError, StrainActivity};
    use serde_json::{Value, json};

    struct MockClient;

    #[async_trait]
    impl IntervalsClient for MockClient {
        async fn get_activities(
            &self,
            _oldest: NaiveDate,
            _newest: NaiveDate,
            _limit: u32,
        ) -> Result<Vec<StrainActivity>, IntervalsError> {
            Ok(vec![StrainActivity {
                start_date: Some("2024-01-01T08:00:00Z".into()),
                ss_cp: Some(10.0),
                ..Default::default()
            }])
        }

        async fn get_athlete(&self) -> Result<Value, IntervalsError> {
            Ok(json!({"name": "Test"}))
        }

        async fn get_sport_settings(&self) -> Result<Value, IntervalsError> {
            Ok(json!([]))
        }

        async fn get_power_curves(&self, _sport: &str, _curves: &str) -> Result<Value, IntervalsError> {
            Ok(json!({"list": []}))
        }
    }

    #[test]
    fn handler_registers_tools_and_prompts() {
        let handler = StrainMcpHandler::new(Arc::new(MockClient));
        let _clone = handler.clone();
        let tools = handler.tool_router.list_all();
        for name in [
            "get_strain_pmc",
            "get_energy_system_balance",
            "get_power_curve",
            "get_athlete_settings",
        ] {
            assert!(tools.iter().any(|t| t.name == name), "missing tool {name}");
        }
        assert_eq!(handler.tool_count(), 4);
        assert_eq!(handler.prompt_count(), 2);
    }

    #[test]
    fn server_info_enables_tools_and_prompts() {
        use rmcp::ServerHandler;
        let info = StrainMcpHandler::new(Arc::new(MockClient)).get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.prompts.is_some());
        assert!(info.capabilities.resources.is_none());
    }

    #[tokio::test]
    async fn tool_errors_are_strings() {
        let handler = StrainMcpHandler::new(Arc::new(MockClient));
        let err = handler
            .get_strain_pmc(Parameters(StrainPmcParams {
                ctl_days: Some(0),
                ..Default::default()
            }))
            .await
            .err()
            .unwrap();
        assert!(err.contains("ctl_days"));
    }

    #[tokio::test]
    async fn athlete_fields_alone_are_a_result() {
        let handler = StrainMcpHandler::new(Arc::new(MockClient));
        let Json(result) = handler
            .get_athlete_settings(Parameters(SportTypeParam::default()))
            .await
            .unwrap();
        assert_eq!(result.value, json!({"name": "Test"}));
    }

    #[tokio::test]
    async fn power_curve_tool_uses_defaults() {
        let handler = StrainMcpHandler::new(Arc::new(MockClient));
        let Json(report) = handler
            .get_power_curve(Parameters(PowerCurveParams::default()))
            .await
            .unwrap();
        assert_eq!(report.activity_type, "Ride");
        assert_eq!(report.curves, "42d");
        assert!(report.points.is_empty());
    }
}
