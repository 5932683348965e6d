use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    AnalyzeRequest, AnalyzeResponse, Expense, ExpenseDraft, PredictionResponse,
};

/// Remote expense backend. The remote side is authoritative; callers only
/// ever hold a cached copy of what `list_expenses` returns.
#[async_trait(?Send)]
pub trait ExpenseApi {
    async fn list_expenses(&self, owner_id: &str) -> ApiResult<Vec<Expense>>;

    async fn create_expense(&self, draft: &ExpenseDraft, owner_id: &str) -> ApiResult<()>;

    async fn delete_expense(&self, id: &str) -> ApiResult<()>;

    async fn analyze(&self, request: &AnalyzeRequest) -> ApiResult<AnalyzeResponse>;

    async fn predict_next_month(&self) -> ApiResult<f64>;
}

/// RFC 3986 unreserved characters stay as-is inside a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub fn expense_path(id: &str) -> String {
    format!("/api/expenses/{}", utf8_percent_encode(id, PATH_SEGMENT))
}

pub struct HttpExpenseApi {
    config: AppConfig,
}

impl HttpExpenseApi {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

async fn check(resp: Response) -> ApiResult<Response> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Status { status, body })
}

#[async_trait(?Send)]
impl ExpenseApi for HttpExpenseApi {
    async fn list_expenses(&self, owner_id: &str) -> ApiResult<Vec<Expense>> {
        let url = self.config.api_url("/api/expenses");
        let resp = Request::get(&url)
            .query([("userId", owner_id)])
            .send()
            .await?;
        let list = check(resp).await?.json::<Vec<Expense>>().await?;
        Ok(list)
    }

    async fn create_expense(&self, draft: &ExpenseDraft, owner_id: &str) -> ApiResult<()> {
        let url = self.config.api_url("/api/expenses");
        let resp = Request::post(&url)
            .json(&draft.create_request(owner_id))?
            .send()
            .await?;
        // the created record comes back too, but the follow-up refresh is what
        // the view renders from
        check(resp).await?;
        Ok(())
    }

    async fn delete_expense(&self, id: &str) -> ApiResult<()> {
        let url = self.config.api_url(&expense_path(id));
        let resp = Request::delete(&url).send().await?;
        check(resp).await?;
        Ok(())
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> ApiResult<AnalyzeResponse> {
        let url = self.config.api_url("/api/ai/analyze");
        let resp = Request::post(&url).json(request)?.send().await?;
        let parsed = check(resp).await?.json::<AnalyzeResponse>().await?;
        Ok(parsed)
    }

    async fn predict_next_month(&self) -> ApiResult<f64> {
        let url = self.config.api_url("/api/ai/predict_future");
        let resp = Request::get(&url).send().await?;
        let parsed = check(resp).await?.json::<PredictionResponse>().await?;
        Ok(parsed.next_month_prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_ids_pass_through_unchanged() {
        assert_eq!(
            expense_path("65f0c1a2b3c4d5e6f7a8b9c0"),
            "/api/expenses/65f0c1a2b3c4d5e6f7a8b9c0"
        );
        assert_eq!(expense_path("exp-1_a.b~c"), "/api/expenses/exp-1_a.b~c");
    }

    #[test]
    fn reserved_characters_stay_inside_the_segment() {
        assert_eq!(expense_path("a/b"), "/api/expenses/a%2Fb");
        assert_eq!(expense_path("x?y#z"), "/api/expenses/x%3Fy%23z");
        assert_eq!(expense_path("with space"), "/api/expenses/with%20space");
    }
}
