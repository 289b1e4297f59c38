/*
[INPUT]:  Session bearer token
[OUTPUT]: User info, mining status and start-mining acknowledgements
[POS]:    HTTP layer - account endpoints (require session auth)
[UPDATE]: When adding new account endpoints or changing response format
*/

// ### Mining Endpoints

use reqwest::Method;

use crate::auth::Session;
use crate::http::{LightminingClient, Result};
use crate::types::{ApiEnvelope, MiningStatus, UserInfo};

impl LightminingClient {
    /// Query the account behind the session
    ///
    /// GET /user/getUserInfo
    pub async fn get_user_info(&self, session: &Session) -> Result<ApiEnvelope<UserInfo>> {
        self.call("getUserInfo", || {
            self.request_with_session(Method::GET, "user/getUserInfo", session)
        })
        .await
    }

    /// Query the last activation timestamp
    ///
    /// GET /assignment/totalMiningTime
    pub async fn get_mining_status(&self, session: &Session) -> Result<ApiEnvelope<MiningStatus>> {
        self.call("totalMiningTime", || {
            self.request_with_session(Method::GET, "assignment/totalMiningTime", session)
        })
        .await
    }

    /// Record the off-chain activation
    ///
    /// POST /assignment/startMining
    pub async fn start_mining(&self, session: &Session) -> Result<ApiEnvelope<serde_json::Value>> {
        self.call("startMining", || {
            Ok(self
                .request_with_session(Method::POST, "assignment/startMining", session)?
                .json(&serde_json::json!({})))
        })
        .await
    }
}
