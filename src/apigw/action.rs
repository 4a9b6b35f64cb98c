use std::fmt;
use std::str::FromStr;

/// API 게이트웨이가 인식하는 원격 액션
///
/// 허용 목록은 고정이며 순서는 `RemoteAction::ALL`을 따른다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RemoteAction {
    CreateService,
    CreateApi,
    CreateUsagePlan,
    CreateApiKey,
    DescribeApisStatus,
    DescribeApi,
    DescribeApiKeysStatus,
    DescribeUsagePlan,
    DescribeUsagePlanSecretIds,
    DescribeUsagePlanEnvironments,
    DescribeService,
    ReleaseService,
    BindSecretIds,
    BindEnvironment,
    UnBindSecretIds,
    UnBindEnvironment,
    UnReleaseService,
    DeleteApi,
    DeleteService,
    DeleteUsagePlan,
    DisableApiKey,
    DeleteApiKey,
    ModifyService,
    ModifyApi,
    ModifyUsagePlan,
}

impl RemoteAction {
    pub const ALL: [RemoteAction; 25] = [
        RemoteAction::CreateService,
        RemoteAction::CreateApi,
        RemoteAction::CreateUsagePlan,
        RemoteAction::CreateApiKey,
        RemoteAction::DescribeApisStatus,
        RemoteAction::DescribeApi,
        RemoteAction::DescribeApiKeysStatus,
        RemoteAction::DescribeUsagePlan,
        RemoteAction::DescribeUsagePlanSecretIds,
        RemoteAction::DescribeUsagePlanEnvironments,
        RemoteAction::DescribeService,
        RemoteAction::ReleaseService,
        RemoteAction::BindSecretIds,
        RemoteAction::BindEnvironment,
        RemoteAction::UnBindSecretIds,
        RemoteAction::UnBindEnvironment,
        RemoteAction::UnReleaseService,
        RemoteAction::DeleteApi,
        RemoteAction::DeleteService,
        RemoteAction::DeleteUsagePlan,
        RemoteAction::DisableApiKey,
        RemoteAction::DeleteApiKey,
        RemoteAction::ModifyService,
        RemoteAction::ModifyApi,
        RemoteAction::ModifyUsagePlan,
    ];

    /// 원격 서비스에 전달되는 액션 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteAction::CreateService => "CreateService",
            RemoteAction::CreateApi => "CreateApi",
            RemoteAction::CreateUsagePlan => "CreateUsagePlan",
            RemoteAction::CreateApiKey => "CreateApiKey",
            RemoteAction::DescribeApisStatus => "DescribeApisStatus",
            RemoteAction::DescribeApi => "DescribeApi",
            RemoteAction::DescribeApiKeysStatus => "DescribeApiKeysStatus",
            RemoteAction::DescribeUsagePlan => "DescribeUsagePlan",
            RemoteAction::DescribeUsagePlanSecretIds => "DescribeUsagePlanSecretIds",
            RemoteAction::DescribeUsagePlanEnvironments => "DescribeUsagePlanEnvironments",
            RemoteAction::DescribeService => "DescribeService",
            RemoteAction::ReleaseService => "ReleaseService",
            RemoteAction::BindSecretIds => "BindSecretIds",
            RemoteAction::BindEnvironment => "BindEnvironment",
            RemoteAction::UnBindSecretIds => "UnBindSecretIds",
            RemoteAction::UnBindEnvironment => "UnBindEnvironment",
            RemoteAction::UnReleaseService => "UnReleaseService",
            RemoteAction::DeleteApi => "DeleteApi",
            RemoteAction::DeleteService => "DeleteService",
            RemoteAction::DeleteUsagePlan => "DeleteUsagePlan",
            RemoteAction::DisableApiKey => "DisableApiKey",
            RemoteAction::DeleteApiKey => "DeleteApiKey",
            RemoteAction::ModifyService => "ModifyService",
            RemoteAction::ModifyApi => "ModifyApi",
            RemoteAction::ModifyUsagePlan => "ModifyUsagePlan",
        }
    }

    /// "존재하지 않음" 실패를 성공으로 취급하는 해제/삭제 액션 여부
    pub fn needs_existence_check(&self) -> bool {
        matches!(
            self,
            RemoteAction::UnBindSecretIds
                | RemoteAction::UnBindEnvironment
                | RemoteAction::DeleteUsagePlan
                | RemoteAction::DeleteApiKey
        )
    }
}

impl fmt::Display for RemoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "알 수 없는 액션: {}", self.0)
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for RemoteAction {
    type Err = UnknownAction;

    // 대소문자 구분
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RemoteAction::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}
