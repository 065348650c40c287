//! Login exchange with `hes-gateway/terminal/initialize/appUserOrInstallerLogin`.

use serde::Deserialize;

use super::envelope::null_as_default;

/// Details of an authenticated account
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginResult {
    pub user_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    /// Session token to send as the `loginToken` header
    #[serde(deserialize_with = "null_as_default")]
    pub token: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    pub password_update_flag: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub user_types: Vec<i64>,
    pub current_type: i64,
    pub survey_flag: i64,
    pub service_voltage_flag: i64,
    pub ninety_days_pwd_update: i64,
}

/// Response to a login attempt
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    pub code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub result: LoginResult,
    pub total: i64,
    pub success: bool,
}

impl LoginResponse {
    /// Token issued by the server, if any
    pub fn token(&self) -> Option<&str> {
        let token = self.result.token.trim();
        (!token.is_empty()).then_some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_login_response() {
        let body = r#"{
            "code": 200,
            "message": "Query success!",
            "result": {
                "userId": 4711,
                "email": "owner@example.com",
                "token": "APP_ACCOUNT:abc123",
                "version": "1.2.3",
                "failureVersion": null,
                "distributorId": null,
                "installerId": null,
                "passwordUpdateFlag": 0,
                "userTypes": [1],
                "currentType": 1,
                "surveyFlag": 0,
                "serviceVoltageFlag": 1,
                "ninetyDaysPwdUpdate": 0
            },
            "total": 1,
            "success": true
        }"#;

        let response: LoginResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.code, 200);
        assert_eq!(response.result.user_id, 4711);
        assert_eq!(response.result.user_types, vec![1]);
        assert_eq!(response.token(), Some("APP_ACCOUNT:abc123"));
    }

    #[test]
    fn test_failed_login_has_no_token() {
        let body = r#"{"code":401,"message":"Account or password error","result":null,"total":0,"success":false}"#;

        let response: LoginResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.token(), None);
        assert!(!response.success);
    }
}
