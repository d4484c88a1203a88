//! Declarative table of API operations.
//!
//! Each operation is a `Route`: an HTTP verb, a path template and where its
//! parameters go. Templates name their placeholders (`{userId}`) for
//! readability, but substitution is positional: the n-th placeholder takes the
//! n-th segment. Segment content is not validated.

use std::fmt::{self, Write as _};

use crate::http::HttpMethod;

/// Where an operation's parameter object is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Query,
    Body,
    None,
}

/// A path segment substituted into a route template. `Sync` keeps the
/// futures of calls borrowing segments `Send`.
pub type Segment<'a> = &'a (dyn fmt::Display + Sync);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub kind: ParamKind,
}

impl Route {
    pub const fn new(
        name: &'static str,
        method: HttpMethod,
        path: &'static str,
        kind: ParamKind,
    ) -> Self {
        Self {
            name,
            method,
            path,
            kind,
        }
    }

    /// Number of `{...}` placeholders in the template.
    pub fn arity(&self) -> usize {
        self.path.matches('{').count()
    }

    /// Substitute `segments` into the template in order. Placeholders left
    /// without a segment are kept verbatim.
    pub fn path_with(&self, segments: &[Segment<'_>]) -> String {
        let mut out = String::with_capacity(self.path.len() + 16);
        let mut segments = segments.iter();
        let mut rest = self.path;
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|i| open + i) else {
                break;
            };
            out.push_str(&rest[..open]);
            match segments.next() {
                Some(segment) => {
                    let _ = write!(out, "{segment}");
                }
                None => out.push_str(&rest[open..=close]),
            }
            rest = &rest[close + 1..];
        }
        out.push_str(rest);
        out
    }
}

use HttpMethod::{Delete, Get, Patch, Post, Put};
use ParamKind::{Body, Query};

macro_rules! repo_path {
    ($suffix:literal) => {
        concat!(
            "/api/v2/projects/{projectIdOrKey}/git/repositories/{repoIdOrName}",
            $suffix
        )
    };
}

macro_rules! routes {
    ($($ident:ident = ($name:literal, $method:expr, $path:expr, $kind:expr);)*) => {
        $(
            pub const $ident: Route = Route::new($name, $method, $path, $kind);
        )*

        /// Every declared operation, in declaration order.
        pub const ROUTES: &[Route] = &[$($ident),*];
    };
}

routes! {
    GET_SPACE = ("getSpace", Get, "/api/v2/space", ParamKind::None);
    GET_SPACE_ACTIVITIES = ("getSpaceActivities", Get, "/api/v2/space/activities", Query);
    GET_SPACE_NOTIFICATION = ("getSpaceNotification", Get, "/api/v2/space/notification", ParamKind::None);
    PUT_SPACE_NOTIFICATION = ("putSpaceNotification", Put, "/api/v2/space/notification", Body);
    GET_SPACE_DISK_USAGE = ("getSpaceDiskUsage", Get, "/api/v2/space/diskUsage", ParamKind::None);

    GET_USERS = ("getUsers", Get, "/api/v2/users", ParamKind::None);
    GET_USER = ("getUser", Get, "/api/v2/users/{userId}", ParamKind::None);
    POST_USER = ("postUser", Post, "/api/v2/users", Body);
    PATCH_USER = ("patchUser", Patch, "/api/v2/users/{userId}", Body);
    DELETE_USER = ("deleteUser", Delete, "/api/v2/users/{userId}", ParamKind::None);
    GET_MYSELF = ("getMyself", Get, "/api/v2/users/myself", ParamKind::None);
    GET_USER_ACTIVITIES = ("getUserActivities", Get, "/api/v2/users/{userId}/activities", Query);
    GET_USER_STARS = ("getUserStars", Get, "/api/v2/users/{userId}/stars", Query);
    GET_USER_STARS_COUNT = ("getUserStarsCount", Get, "/api/v2/users/{userId}/stars/count", Query);
    GET_RECENTLY_VIEWED_ISSUES = ("getRecentlyViewedIssues", Get, "/api/v2/users/myself/recentlyViewedIssues", Query);
    GET_RECENTLY_VIEWED_PROJECTS = ("getRecentlyViewedProjects", Get, "/api/v2/users/myself/recentlyViewedProjects", Query);
    GET_RECENTLY_VIEWED_WIKIS = ("getRecentlyViewedWikis", Get, "/api/v2/users/myself/recentlyViewedWikis", Query);

    GET_GROUPS = ("getGroups", Get, "/api/v2/groups", Query);
    POST_GROUPS = ("postGroups", Post, "/api/v2/groups", Body);
    GET_GROUP = ("getGroup", Get, "/api/v2/groups/{groupId}", ParamKind::None);
    PATCH_GROUP = ("patchGroup", Patch, "/api/v2/groups/{groupId}", Body);
    DELETE_GROUP = ("deleteGroup", Delete, "/api/v2/groups/{groupId}", ParamKind::None);

    POST_ISSUE = ("postIssue", Post, "/api/v2/issues", Body);
    PATCH_ISSUE = ("patchIssue", Patch, "/api/v2/issues/{issueIdOrKey}", Body);
    GET_ISSUES = ("getIssues", Get, "/api/v2/issues", Query);
    GET_ISSUE = ("getIssue", Get, "/api/v2/issues/{issueIdOrKey}", ParamKind::None);

    GET_PROJECTS = ("getProjects", Get, "/api/v2/projects", Query);
    GET_ISSUE_TYPES = ("getIssueTypes", Get, "/api/v2/projects/{projectIdOrKey}/issueTypes", ParamKind::None);
    GET_PRIORITIES = ("getPriorities", Get, "/api/v2/priorities", ParamKind::None);
    GET_CATEGORIES = ("getCategories", Get, "/api/v2/projects/{projectIdOrKey}/categories", ParamKind::None);
    GET_VERSIONS = ("getVersions", Get, "/api/v2/projects/{projectIdOrKey}/versions", ParamKind::None);
    GET_PROJECT_USERS = ("getProjectUsers", Get, "/api/v2/projects/{projectIdOrKey}/users", ParamKind::None);
    GET_STATUSES = ("getStatuses", Get, "/api/v2/statuses", ParamKind::None);

    GET_GIT_REPOSITORIES = ("getGitRepositories", Get, "/api/v2/projects/{projectIdOrKey}/git/repositories", ParamKind::None);
    GET_GIT_REPOSITORY = ("getGitRepository", Get, repo_path!(""), ParamKind::None);
    GET_PULL_REQUESTS = ("getPullRequests", Get, repo_path!("/pullRequests"), Query);
    GET_PULL_REQUESTS_COUNT = ("getPullRequestsCount", Get, repo_path!("/pullRequests/count"), Query);
    POST_PULL_REQUEST = ("postPullRequest", Post, repo_path!("/pullRequests"), Body);
    GET_PULL_REQUEST = ("getPullRequest", Get, repo_path!("/pullRequests/{number}"), ParamKind::None);
    PATCH_PULL_REQUEST = ("patchPullRequest", Patch, repo_path!("/pullRequests/{number}"), Body);
    GET_PULL_REQUEST_COMMENTS = ("getPullRequestComments", Get, repo_path!("/pullRequests/{number}/comments"), Query);
    POST_PULL_REQUEST_COMMENTS = ("postPullRequestComments", Post, repo_path!("/pullRequests/{number}/comments"), Body);
    GET_PULL_REQUEST_COMMENTS_COUNT = ("getPullRequestCommentsCount", Get, repo_path!("/pullRequests/{number}/comments/count"), ParamKind::None);
    PATCH_PULL_REQUEST_COMMENTS = ("patchPullRequestComments", Patch, repo_path!("/pullRequests/{number}/comments/{commentId}"), Body);
    GET_PULL_REQUEST_ATTACHMENTS = ("getPullRequestAttachments", Get, repo_path!("/pullRequests/{number}/attachments"), ParamKind::None);
    DELETE_PULL_REQUEST_ATTACHMENT = ("deletePullRequestAttachment", Delete, repo_path!("/pullRequests/{number}/attachments/{attachmentId}"), ParamKind::None);
}

/// Look up a route by its operation name.
pub fn find(name: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.name == name)
}
