//! One method per Backlog operation.
//!
//! Each method forwards its path segments and parameter object to
//! `BacklogClient::call` with the matching `route` entry.

use serde_json::Value;

use crate::client::BacklogClient;
use crate::error::ApiError;
use crate::params::ToParams;
use crate::route;
use crate::types::*;

type ApiResult = Result<Value, ApiError>;

impl BacklogClient {
    // -- space --------------------------------------------------------------

    pub async fn get_space(&self) -> ApiResult {
        self.call(&route::GET_SPACE, &[], &NoParams.to_params()).await
    }

    pub async fn get_space_activities(&self, params: &GetSpaceActivitiesParams) -> ApiResult {
        self.call(&route::GET_SPACE_ACTIVITIES, &[], &params.to_params()).await
    }

    pub async fn get_space_notification(&self) -> ApiResult {
        self.call(&route::GET_SPACE_NOTIFICATION, &[], &NoParams.to_params()).await
    }

    pub async fn put_space_notification(&self, params: &PutSpaceNotificationParams) -> ApiResult {
        self.call(&route::PUT_SPACE_NOTIFICATION, &[], &params.to_params()).await
    }

    pub async fn get_space_disk_usage(&self) -> ApiResult {
        self.call(&route::GET_SPACE_DISK_USAGE, &[], &NoParams.to_params()).await
    }

    // -- users --------------------------------------------------------------

    pub async fn get_users(&self) -> ApiResult {
        self.call(&route::GET_USERS, &[], &NoParams.to_params()).await
    }

    pub async fn get_user(&self, user_id: u64) -> ApiResult {
        self.call(&route::GET_USER, &[&user_id], &NoParams.to_params()).await
    }

    pub async fn post_user(&self, params: &PostUserParams) -> ApiResult {
        self.call(&route::POST_USER, &[], &params.to_params()).await
    }

    pub async fn patch_user(&self, user_id: u64, params: &PatchUserParams) -> ApiResult {
        self.call(&route::PATCH_USER, &[&user_id], &params.to_params()).await
    }

    pub async fn delete_user(&self, user_id: u64) -> ApiResult {
        self.call(&route::DELETE_USER, &[&user_id], &NoParams.to_params()).await
    }

    pub async fn get_myself(&self) -> ApiResult {
        self.call(&route::GET_MYSELF, &[], &NoParams.to_params()).await
    }

    pub async fn get_user_activities(
        &self,
        user_id: u64,
        params: &GetUserActivitiesParams,
    ) -> ApiResult {
        self.call(&route::GET_USER_ACTIVITIES, &[&user_id], &params.to_params()).await
    }

    pub async fn get_user_stars(&self, user_id: u64, params: &GetUserStarsParams) -> ApiResult {
        self.call(&route::GET_USER_STARS, &[&user_id], &params.to_params()).await
    }

    pub async fn get_user_stars_count(
        &self,
        user_id: u64,
        params: &GetUserStarsCountParams,
    ) -> ApiResult {
        self.call(&route::GET_USER_STARS_COUNT, &[&user_id], &params.to_params()).await
    }

    pub async fn get_recently_viewed_issues(&self, params: &GetRecentlyViewedParams) -> ApiResult {
        self.call(&route::GET_RECENTLY_VIEWED_ISSUES, &[], &params.to_params()).await
    }

    pub async fn get_recently_viewed_projects(
        &self,
        params: &GetRecentlyViewedParams,
    ) -> ApiResult {
        self.call(&route::GET_RECENTLY_VIEWED_PROJECTS, &[], &params.to_params()).await
    }

    pub async fn get_recently_viewed_wikis(&self, params: &GetRecentlyViewedParams) -> ApiResult {
        self.call(&route::GET_RECENTLY_VIEWED_WIKIS, &[], &params.to_params()).await
    }

    // -- groups -------------------------------------------------------------

    pub async fn get_groups(&self, params: &GetGroupsParams) -> ApiResult {
        self.call(&route::GET_GROUPS, &[], &params.to_params()).await
    }

    pub async fn post_groups(&self, params: &PostGroupsParams) -> ApiResult {
        self.call(&route::POST_GROUPS, &[], &params.to_params()).await
    }

    pub async fn get_group(&self, group_id: u64) -> ApiResult {
        self.call(&route::GET_GROUP, &[&group_id], &NoParams.to_params()).await
    }

    pub async fn patch_group(&self, group_id: u64, params: &PatchGroupParams) -> ApiResult {
        self.call(&route::PATCH_GROUP, &[&group_id], &params.to_params()).await
    }

    pub async fn delete_group(&self, group_id: u64) -> ApiResult {
        self.call(&route::DELETE_GROUP, &[&group_id], &NoParams.to_params()).await
    }

    // -- issues and projects ------------------------------------------------

    pub async fn post_issue(&self, params: &PostIssueParams) -> ApiResult {
        self.call(&route::POST_ISSUE, &[], &params.to_params()).await
    }

    pub async fn patch_issue(&self, issue_id_or_key: &str, params: &PatchIssueParams) -> ApiResult {
        self.call(&route::PATCH_ISSUE, &[&issue_id_or_key], &params.to_params()).await
    }

    pub async fn get_issues(&self, params: &GetIssuesParams) -> ApiResult {
        self.call(&route::GET_ISSUES, &[], &params.to_params()).await
    }

    pub async fn get_issue(&self, issue_id_or_key: &str) -> ApiResult {
        self.call(&route::GET_ISSUE, &[&issue_id_or_key], &NoParams.to_params()).await
    }

    pub async fn get_projects(&self, params: &GetProjectsParams) -> ApiResult {
        self.call(&route::GET_PROJECTS, &[], &params.to_params()).await
    }

    pub async fn get_issue_types(&self, project_id_or_key: &str) -> ApiResult {
        self.call(&route::GET_ISSUE_TYPES, &[&project_id_or_key], &NoParams.to_params()).await
    }

    pub async fn get_priorities(&self) -> ApiResult {
        self.call(&route::GET_PRIORITIES, &[], &NoParams.to_params()).await
    }

    pub async fn get_categories(&self, project_id_or_key: &str) -> ApiResult {
        self.call(&route::GET_CATEGORIES, &[&project_id_or_key], &NoParams.to_params()).await
    }

    pub async fn get_versions(&self, project_id_or_key: &str) -> ApiResult {
        self.call(&route::GET_VERSIONS, &[&project_id_or_key], &NoParams.to_params()).await
    }

    pub async fn get_project_users(&self, project_id_or_key: &str) -> ApiResult {
        self.call(&route::GET_PROJECT_USERS, &[&project_id_or_key], &NoParams.to_params()).await
    }

    pub async fn get_statuses(&self) -> ApiResult {
        self.call(&route::GET_STATUSES, &[], &NoParams.to_params()).await
    }

    // -- git and pull requests ----------------------------------------------

    pub async fn get_git_repositories(&self, project_id_or_key: &str) -> ApiResult {
        self.call(&route::GET_GIT_REPOSITORIES, &[&project_id_or_key], &NoParams.to_params())
            .await
    }

    pub async fn get_git_repository(&self, project_id_or_key: &str, repo: &str) -> ApiResult {
        self.call(
            &route::GET_GIT_REPOSITORY,
            &[&project_id_or_key, &repo],
            &NoParams.to_params(),
        )
        .await
    }

    pub async fn get_pull_requests(
        &self,
        project_id_or_key: &str,
        repo: &str,
        params: &GetPullRequestsParams,
    ) -> ApiResult {
        self.call(
            &route::GET_PULL_REQUESTS,
            &[&project_id_or_key, &repo],
            &params.to_params(),
        )
        .await
    }

    pub async fn get_pull_requests_count(
        &self,
        project_id_or_key: &str,
        repo: &str,
        params: &GetPullRequestsParams,
    ) -> ApiResult {
        self.call(
            &route::GET_PULL_REQUESTS_COUNT,
            &[&project_id_or_key, &repo],
            &params.to_params(),
        )
        .await
    }

    pub async fn post_pull_request(
        &self,
        project_id_or_key: &str,
        repo: &str,
        params: &PostPullRequestParams,
    ) -> ApiResult {
        self.call(
            &route::POST_PULL_REQUEST,
            &[&project_id_or_key, &repo],
            &params.to_params(),
        )
        .await
    }

    pub async fn get_pull_request(
        &self,
        project_id_or_key: &str,
        repo: &str,
        number: u64,
    ) -> ApiResult {
        self.call(
            &route::GET_PULL_REQUEST,
            &[&project_id_or_key, &repo, &number],
            &NoParams.to_params(),
        )
        .await
    }

    pub async fn patch_pull_request(
        &self,
        project_id_or_key: &str,
        repo: &str,
        number: u64,
        params: &PatchPullRequestParams,
    ) -> ApiResult {
        self.call(
            &route::PATCH_PULL_REQUEST,
            &[&project_id_or_key, &repo, &number],
            &params.to_params(),
        )
        .await
    }

    pub async fn get_pull_request_comments(
        &self,
        project_id_or_key: &str,
        repo: &str,
        number: u64,
        params: &GetPullRequestCommentsParams,
    ) -> ApiResult {
        self.call(
            &route::GET_PULL_REQUEST_COMMENTS,
            &[&project_id_or_key, &repo, &number],
            &params.to_params(),
        )
        .await
    }

    pub async fn post_pull_request_comments(
        &self,
        project_id_or_key: &str,
        repo: &str,
        number: u64,
        params: &PostPullRequestCommentsParams,
    ) -> ApiResult {
        self.call(
            &route::POST_PULL_REQUEST_COMMENTS,
            &[&project_id_or_key, &repo, &number],
            &params.to_params(),
        )
        .await
    }

    pub async fn get_pull_request_comments_count(
        &self,
        project_id_or_key: &str,
        repo: &str,
        number: u64,
    ) -> ApiResult {
        self.call(
            &route::GET_PULL_REQUEST_COMMENTS_COUNT,
            &[&project_id_or_key, &repo, &number],
            &NoParams.to_params(),
        )
        .await
    }

    pub async fn patch_pull_request_comments(
        &self,
        project_id_or_key: &str,
        repo: &str,
        number: u64,
        comment_id: u64,
        params: &PatchPullRequestCommentsParams,
    ) -> ApiResult {
        self.call(
            &route::PATCH_PULL_REQUEST_COMMENTS,
            &[&project_id_or_key, &repo, &number, &comment_id],
            &params.to_params(),
        )
        .await
    }

    pub async fn get_pull_request_attachments(
        &self,
        project_id_or_key: &str,
        repo: &str,
        number: u64,
    ) -> ApiResult {
        self.call(
            &route::GET_PULL_REQUEST_ATTACHMENTS,
            &[&project_id_or_key, &repo, &number],
            &NoParams.to_params(),
        )
        .await
    }

    pub async fn delete_pull_request_attachment(
        &self,
        project_id_or_key: &str,
        repo: &str,
        number: u64,
        attachment_id: u64,
    ) -> ApiResult {
        self.call(
            &route::DELETE_PULL_REQUEST_ATTACHMENT,
            &[&project_id_or_key, &repo, &number, &attachment_id],
            &NoParams.to_params(),
        )
        .await
    }
}
