use reqwest::Client;
use tracing::{debug, error};

use crate::analysis::{build_system_prompt, build_user_prompt, parse_analysis, MealAnalysis, MealType, Profile};
use crate::config::GatewayConfig;
use crate::errors::{GatewayError, GatewayResult};
use crate::types::*;

/// Client for the external completion service
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: Client,
    config: GatewayConfig,
    model: CompletionModel,
}

impl AnalysisClient {
    /// Create a new analysis client
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            GatewayError::ConfigError(
                "API key is required to initialize the analysis client".to_string(),
            )
        })?;

        let model = CompletionModel::new(api_key, config.model_name.clone());

        let client = Client::new();

        Ok(Self {
            client,
            config,
            model,
        })
    }

    /// Get the completions endpoint URL
    fn get_completions_url(&self) -> String {
        let base = self
            .config
            .api_base
            .as_deref()
            .unwrap_or("https://api.openai.com/v1");
        format!("{}/chat/completions", base.trim_end_matches('/'))
    }

    /// Send one completion request to the service
    pub async fn complete(
        &self,
        request: ChatCompletionRequest,
    ) -> GatewayResult<ChatCompletionResponse> {
        let url = self.get_completions_url();

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.model.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::RequestError(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.map_err(|e| {
                GatewayError::ResponseError(format!("Failed to read error response: {}", e))
            })?;

            return Err(GatewayError::HttpError {
                status_code: status.as_u16(),
                message: format!("API request failed: {}", error_body),
            });
        }

        let response_body = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| GatewayError::ParsingError(format!("Failed to parse response: {}", e)))?;

        Ok(response_body)
    }

    /// Build the analysis request for the given images, profile and meal type
    pub(crate) fn create_analysis_request(
        &self,
        image_data_uris: &[String],
        profile: &Profile,
        meal_type: MealType,
    ) -> ChatCompletionRequest {
        let mut parts = vec![ContentPart::text(build_user_prompt(meal_type))];
        for uri in image_data_uris {
            parts.push(ContentPart::image(uri.clone()));
        }

        ChatCompletionRequest {
            model: self.model.model_name.clone(),
            messages: vec![
                ChatMessage::system(build_system_prompt(profile, meal_type)),
                ChatMessage::user(parts),
            ],
            response_format: Some(ResponseFormat::json_object()),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Extract the first choice's message content from a response
    pub fn extract_content(&self, response: &ChatCompletionResponse) -> GatewayResult<String> {
        let choice = response
            .choices
            .first()
            .ok_or_else(|| GatewayError::ResponseError("No choices in response".to_string()))?;

        // An absent content field is treated like an empty body; downstream
        // parsing turns it into an all-default analysis.
        Ok(choice.message.content.clone().unwrap_or_default())
    }

    /// Run one meal analysis: build the request, call the service and parse
    /// the returned JSON.
    ///
    /// All failure kinds (network, HTTP status, malformed JSON) collapse into
    /// `GatewayError::AnalysisFailed`; the specifics are only logged. Exactly
    /// one call is in flight per submission; the caller is responsible for
    /// disabling re-submission while this future is pending.
    pub async fn analyze_meal(
        &self,
        image_data_uris: &[String],
        profile: &Profile,
        meal_type: MealType,
    ) -> GatewayResult<MealAnalysis> {
        debug!(
            images = image_data_uris.len(),
            meal_type = %meal_type,
            "Submitting meal analysis request"
        );

        let request = self.create_analysis_request(image_data_uris, profile, meal_type);

        let result = async {
            let response = self.complete(request).await?;
            let content = self.extract_content(&response)?;
            parse_analysis(&content)
        }
        .await;

        match result {
            Ok(analysis) => Ok(analysis),
            Err(e) => {
                error!("Meal analysis failed: {}", e);
                Err(GatewayError::AnalysisFailed)
            }
        }
    }
}
