//! Typed parameter objects and enumerations of the Backlog API.
//!
//! # Design
//! Each parameter struct mirrors one operation's accepted fields and converts
//! into a `ParamMap` through `ToParams`, in the field order the wire output
//! should follow. Optional scalars are `Option`s and list fields are `Vec`s;
//! an empty `Vec` sends nothing.
//!
//! Issue parameters accept arbitrary `customField_{id}` entries through
//! `custom_fields`, merged after the typed fields.

use serde::{Deserialize, Serialize};

use crate::params::{ParamMap, Scalar, ToParams};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

impl From<Order> for Scalar {
    fn from(value: Order) -> Self {
        Scalar::from(value.as_str())
    }
}

/// Activity kinds reported by the activity feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i64)]
pub enum ActivityType {
    Undefined = -1,
    IssueCreated = 1,
    IssueUpdated = 2,
    IssueCommented = 3,
    IssueDeleted = 4,
    WikiCreated = 5,
    WikiUpdated = 6,
    WikiDeleted = 7,
    FileAdded = 8,
    FileUpdated = 9,
    FileDeleted = 10,
    SvnCommitted = 11,
    GitPushed = 12,
    GitRepositoryCreated = 13,
    IssueMultiUpdated = 14,
    ProjectUserAdded = 15,
    ProjectUserRemoved = 16,
    NotifyAdded = 17,
    PullRequestAdded = 18,
    PullRequestUpdated = 19,
    PullRequestCommented = 20,
    PullRequestMerged = 21,
}

impl From<ActivityType> for Scalar {
    fn from(value: ActivityType) -> Self {
        Scalar::Int(value as i64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i64)]
pub enum RoleType {
    Admin = 1,
    User = 2,
    Reporter = 3,
    Viewer = 4,
    GuestReporter = 5,
    GuestViewer = 6,
}

impl From<RoleType> for Scalar {
    fn from(value: RoleType) -> Self {
        Scalar::Int(value as i64)
    }
}

/// Parent/child filter for issue searches. `All` is the server default and,
/// being zero, is never sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i64)]
pub enum ParentChildType {
    All = 0,
    NotChild = 1,
    Child = 2,
    NotChildNotParent = 3,
    Parent = 4,
}

impl From<ParentChildType> for Scalar {
    fn from(value: ParentChildType) -> Self {
        Scalar::Int(value as i64)
    }
}

/// Sort keys accepted by issue searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    IssueType,
    Category,
    Version,
    Milestone,
    Summary,
    Status,
    Priority,
    Attachment,
    SharedFile,
    Created,
    CreatedUser,
    Updated,
    UpdatedUser,
    Assignee,
    StartDate,
    DueDate,
    EstimatedHours,
    ActualHours,
    ChildIssue,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::IssueType => "issueType",
            SortKey::Category => "category",
            SortKey::Version => "version",
            SortKey::Milestone => "milestone",
            SortKey::Summary => "summary",
            SortKey::Status => "status",
            SortKey::Priority => "priority",
            SortKey::Attachment => "attachment",
            SortKey::SharedFile => "sharedFile",
            SortKey::Created => "created",
            SortKey::CreatedUser => "createdUser",
            SortKey::Updated => "updated",
            SortKey::UpdatedUser => "updatedUser",
            SortKey::Assignee => "assignee",
            SortKey::StartDate => "startDate",
            SortKey::DueDate => "dueDate",
            SortKey::EstimatedHours => "estimatedHours",
            SortKey::ActualHours => "actualHours",
            SortKey::ChildIssue => "childIssue",
        }
    }
}

impl From<SortKey> for Scalar {
    fn from(value: SortKey) -> Self {
        Scalar::from(value.as_str())
    }
}

/// Operations that take no parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoParams;

impl ToParams for NoParams {
    fn to_params(&self) -> ParamMap {
        ParamMap::new()
    }
}

// ---------------------------------------------------------------------------
// Space and users
// ---------------------------------------------------------------------------

/// Filter for space and user activity feeds.
#[derive(Debug, Clone, Default)]
pub struct GetActivitiesParams {
    pub activity_type_id: Vec<ActivityType>,
    pub min_id: Option<u64>,
    pub max_id: Option<u64>,
    pub count: Option<u32>,
    pub order: Option<Order>,
}

pub type GetSpaceActivitiesParams = GetActivitiesParams;
pub type GetUserActivitiesParams = GetActivitiesParams;

impl ToParams for GetActivitiesParams {
    fn to_params(&self) -> ParamMap {
        ParamMap::new()
            .with("activityTypeId", self.activity_type_id.as_slice())
            .with("minId", self.min_id)
            .with("maxId", self.max_id)
            .with("count", self.count)
            .with("order", self.order)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PutSpaceNotificationParams {
    pub content: String,
}

impl ToParams for PutSpaceNotificationParams {
    fn to_params(&self) -> ParamMap {
        ParamMap::new().with("content", &self.content)
    }
}

#[derive(Debug, Clone)]
pub struct PostUserParams {
    pub user_id: String,
    pub password: String,
    pub name: String,
    pub mail_address: String,
    pub role_type: RoleType,
}

impl ToParams for PostUserParams {
    fn to_params(&self) -> ParamMap {
        ParamMap::new()
            .with("userId", &self.user_id)
            .with("password", &self.password)
            .with("name", &self.name)
            .with("mailAddress", &self.mail_address)
            .with("roleType", Scalar::from(self.role_type))
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatchUserParams {
    pub password: Option<String>,
    pub name: Option<String>,
    pub mail_address: Option<String>,
    pub role_type: Option<RoleType>,
}

impl ToParams for PatchUserParams {
    fn to_params(&self) -> ParamMap {
        ParamMap::new()
            .with("password", self.password.clone())
            .with("name", self.name.clone())
            .with("mailAddress", self.mail_address.clone())
            .with("roleType", self.role_type)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetUserStarsParams {
    pub min_id: Option<u64>,
    pub max_id: Option<u64>,
    pub count: Option<u32>,
    pub order: Option<Order>,
}

impl ToParams for GetUserStarsParams {
    fn to_params(&self) -> ParamMap {
        ParamMap::new()
            .with("minId", self.min_id)
            .with("maxId", self.max_id)
            .with("count", self.count)
            .with("order", self.order)
    }
}

/// Date range (`yyyy-MM-dd`) for star counts.
#[derive(Debug, Clone, Default)]
pub struct GetUserStarsCountParams {
    pub since: Option<String>,
    pub until: Option<String>,
}

impl ToParams for GetUserStarsCountParams {
    fn to_params(&self) -> ParamMap {
        ParamMap::new()
            .with("since", self.since.clone())
            .with("until", self.until.clone())
    }
}

/// Paging shared by the recently-viewed lists and the group list.
#[derive(Debug, Clone, Default)]
pub struct PageParams {
    pub order: Option<Order>,
    pub offset: Option<u32>,
    pub count: Option<u32>,
}

pub type GetRecentlyViewedParams = PageParams;
pub type GetGroupsParams = PageParams;

impl ToParams for PageParams {
    fn to_params(&self) -> ParamMap {
        ParamMap::new()
            .with("order", self.order)
            .with("offset", self.offset)
            .with("count", self.count)
    }
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct PostGroupsParams {
    pub name: String,
    pub members: Vec<String>,
}

impl ToParams for PostGroupsParams {
    fn to_params(&self) -> ParamMap {
        ParamMap::new()
            .with("name", &self.name)
            .with("members", self.members.as_slice())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatchGroupParams {
    pub name: Option<String>,
    pub members: Vec<String>,
}

impl ToParams for PatchGroupParams {
    fn to_params(&self) -> ParamMap {
        ParamMap::new()
            .with("name", self.name.clone())
            .with("members", self.members.as_slice())
    }
}

// ---------------------------------------------------------------------------
// Issues and projects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct PostIssueParams {
    pub project_id: u64,
    pub summary: String,
    pub priority_id: u64,
    pub issue_type_id: u64,
    pub parent_issue_id: Option<u64>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
    pub category_id: Vec<u64>,
    pub version_id: Vec<u64>,
    pub milestone_id: Vec<u64>,
    pub assignee_id: Option<u64>,
    pub notified_user_id: Vec<u64>,
    pub attachment_id: Vec<u64>,
    /// `customField_{id}` entries.
    pub custom_fields: ParamMap,
}

impl ToParams for PostIssueParams {
    fn to_params(&self) -> ParamMap {
        let mut params = ParamMap::new()
            .with("projectId", self.project_id)
            .with("summary", &self.summary)
            .with("priorityId", self.priority_id)
            .with("issueTypeId", self.issue_type_id)
            .with("parentIssueId", self.parent_issue_id)
            .with("description", self.description.clone())
            .with("startDate", self.start_date.clone())
            .with("dueDate", self.due_date.clone())
            .with("estimatedHours", self.estimated_hours)
            .with("actualHours", self.actual_hours)
            .with("categoryId", self.category_id.as_slice())
            .with("versionId", self.version_id.as_slice())
            .with("milestoneId", self.milestone_id.as_slice())
            .with("assigneeId", self.assignee_id)
            .with("notifiedUserId", self.notified_user_id.as_slice())
            .with("attachmentId", self.attachment_id.as_slice());
        params.extend(&self.custom_fields);
        params
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatchIssueParams {
    pub summary: Option<String>,
    pub parent_issue_id: Option<u64>,
    pub description: Option<String>,
    pub status_id: Option<u64>,
    pub resolution_id: Option<u64>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
    pub issue_type_id: Option<u64>,
    pub category_id: Vec<u64>,
    pub version_id: Vec<u64>,
    pub milestone_id: Vec<u64>,
    pub priority_id: Option<u64>,
    pub assignee_id: Option<u64>,
    pub notified_user_id: Vec<u64>,
    pub attachment_id: Vec<u64>,
    pub comment: Option<String>,
    /// `customField_{id}` entries.
    pub custom_fields: ParamMap,
}

impl ToParams for PatchIssueParams {
    fn to_params(&self) -> ParamMap {
        let mut params = ParamMap::new()
            .with("summary", self.summary.clone())
            .with("parentIssueId", self.parent_issue_id)
            .with("description", self.description.clone())
            .with("statusId", self.status_id)
            .with("resolutionId", self.resolution_id)
            .with("startDate", self.start_date.clone())
            .with("dueDate", self.due_date.clone())
            .with("estimatedHours", self.estimated_hours)
            .with("actualHours", self.actual_hours)
            .with("issueTypeId", self.issue_type_id)
            .with("categoryId", self.category_id.as_slice())
            .with("versionId", self.version_id.as_slice())
            .with("milestoneId", self.milestone_id.as_slice())
            .with("priorityId", self.priority_id)
            .with("assigneeId", self.assignee_id)
            .with("notifiedUserId", self.notified_user_id.as_slice())
            .with("attachmentId", self.attachment_id.as_slice())
            .with("comment", self.comment.clone());
        params.extend(&self.custom_fields);
        params
    }
}

/// Issue search filter. Dates are `yyyy-MM-dd`.
#[derive(Debug, Clone, Default)]
pub struct GetIssuesParams {
    pub project_id: Vec<u64>,
    pub issue_type_id: Vec<u64>,
    pub category_id: Vec<u64>,
    pub version_id: Vec<u64>,
    pub milestone_id: Vec<u64>,
    pub status_id: Vec<u64>,
    pub priority_id: Vec<u64>,
    pub assignee_id: Vec<u64>,
    pub created_user_id: Vec<u64>,
    pub resolution_id: Vec<u64>,
    pub parent_child: Option<ParentChildType>,
    pub attachment: Option<bool>,
    pub shared_file: Option<bool>,
    pub sort: Option<SortKey>,
    pub order: Option<Order>,
    pub offset: Option<u32>,
    pub count: Option<u32>,
    pub created_since: Option<String>,
    pub created_until: Option<String>,
    pub updated_since: Option<String>,
    pub updated_until: Option<String>,
    pub start_date_since: Option<String>,
    pub start_date_until: Option<String>,
    pub due_date_since: Option<String>,
    pub due_date_until: Option<String>,
    pub id: Vec<u64>,
    pub parent_issue_id: Vec<u64>,
    pub keyword: Option<String>,
}

impl ToParams for GetIssuesParams {
    fn to_params(&self) -> ParamMap {
        ParamMap::new()
            .with("projectId", self.project_id.as_slice())
            .with("issueTypeId", self.issue_type_id.as_slice())
            .with("categoryId", self.category_id.as_slice())
            .with("versionId", self.version_id.as_slice())
            .with("milestoneId", self.milestone_id.as_slice())
            .with("statusId", self.status_id.as_slice())
            .with("priorityId", self.priority_id.as_slice())
            .with("assigneeId", self.assignee_id.as_slice())
            .with("createdUserId", self.created_user_id.as_slice())
            .with("resolutionId", self.resolution_id.as_slice())
            .with("parentChild", self.parent_child)
            .with("attachment", self.attachment)
            .with("sharedFile", self.shared_file)
            .with("sort", self.sort)
            .with("order", self.order)
            .with("offset", self.offset)
            .with("count", self.count)
            .with("createdSince", self.created_since.clone())
            .with("createdUntil", self.created_until.clone())
            .with("updatedSince", self.updated_since.clone())
            .with("updatedUntil", self.updated_until.clone())
            .with("startDateSince", self.start_date_since.clone())
            .with("startDateUntil", self.start_date_until.clone())
            .with("dueDateSince", self.due_date_since.clone())
            .with("dueDateUntil", self.due_date_until.clone())
            .with("id", self.id.as_slice())
            .with("parentIssueId", self.parent_issue_id.as_slice())
            .with("keyword", self.keyword.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetProjectsParams {
    pub archived: Option<bool>,
    pub all: Option<bool>,
}

impl ToParams for GetProjectsParams {
    fn to_params(&self) -> ParamMap {
        ParamMap::new()
            .with("archived", self.archived)
            .with("all", self.all)
    }
}

// ---------------------------------------------------------------------------
// Pull requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct GetPullRequestsParams {
    pub status_id: Vec<u64>,
    pub assignee_id: Vec<u64>,
    pub issue_id: Vec<u64>,
    pub created_user_id: Vec<u64>,
    pub offset: Option<u32>,
    pub count: Option<u32>,
}

impl ToParams for GetPullRequestsParams {
    fn to_params(&self) -> ParamMap {
        ParamMap::new()
            .with("statusId", self.status_id.as_slice())
            .with("assigneeId", self.assignee_id.as_slice())
            .with("issueId", self.issue_id.as_slice())
            .with("createdUserId", self.created_user_id.as_slice())
            .with("offset", self.offset)
            .with("count", self.count)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostPullRequestParams {
    pub summary: String,
    pub description: String,
    pub base: String,
    pub branch: String,
    pub issue_id: Option<u64>,
    pub assignee_id: Option<u64>,
    pub notified_user_id: Vec<u64>,
    pub attachment_id: Vec<u64>,
}

impl ToParams for PostPullRequestParams {
    fn to_params(&self) -> ParamMap {
        ParamMap::new()
            .with("summary", &self.summary)
            .with("description", &self.description)
            .with("base", &self.base)
            .with("branch", &self.branch)
            .with("issueId", self.issue_id)
            .with("assigneeId", self.assignee_id)
            .with("notifiedUserId", self.notified_user_id.as_slice())
            .with("attachmentId", self.attachment_id.as_slice())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatchPullRequestParams {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub issue_id: Option<u64>,
    pub assignee_id: Option<u64>,
    pub notified_user_id: Vec<u64>,
    pub comment: Option<String>,
}

impl ToParams for PatchPullRequestParams {
    fn to_params(&self) -> ParamMap {
        ParamMap::new()
            .with("summary", self.summary.clone())
            .with("description", self.description.clone())
            .with("issueId", self.issue_id)
            .with("assigneeId", self.assignee_id)
            .with("notifiedUserId", self.notified_user_id.as_slice())
            .with("comment", self.comment.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetPullRequestCommentsParams {
    pub min_id: Option<u64>,
    pub max_id: Option<u64>,
    pub count: Option<u32>,
    pub order: Option<Order>,
}

impl ToParams for GetPullRequestCommentsParams {
    fn to_params(&self) -> ParamMap {
        ParamMap::new()
            .with("minId", self.min_id)
            .with("maxId", self.max_id)
            .with("count", self.count)
            .with("order", self.order)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostPullRequestCommentsParams {
    pub content: String,
    pub notified_user_id: Vec<u64>,
}

impl ToParams for PostPullRequestCommentsParams {
    fn to_params(&self) -> ParamMap {
        ParamMap::new()
            .with("content", &self.content)
            .with("notifiedUserId", self.notified_user_id.as_slice())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatchPullRequestCommentsParams {
    pub content: String,
}

impl ToParams for PatchPullRequestCommentsParams {
    fn to_params(&self) -> ParamMap {
        ParamMap::new().with("content", &self.content)
    }
}
