use std::collections::{HashMap, HashSet};

use futures::future::try_join_all;
use serde::Serialize;
use tracing::info;

use super::{matches_choice, matches_search};
use crate::access;
use crate::error::AppError;
use crate::models::*;
use crate::queries::{self, keys};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumWithCourse {
    pub forum: Forum,
    pub course: Course,
}

#[derive(Debug, Clone, Default)]
pub struct ForumFilter {
    pub search: String,
    pub course_id: Option<String>,
}

impl ForumFilter {
    pub fn matches(&self, forum: &Forum) -> bool {
        let search = matches_search(&forum.title, &self.search)
            || forum
                .description
                .as_deref()
                .is_some_and(|d| !self.search.is_empty() && matches_search(d, &self.search));
        search && matches_choice(Some(forum.course_id.as_str()), self.course_id.as_deref())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumThread {
    pub post: ForumPost,
    pub replies: Vec<ForumThread>,
}

impl ForumThread {
    /// Arrange flat posts into threads by `parentId`. Replies whose parent is
    /// missing, or whose parents loop, are promoted to the top level.
    pub fn build(posts: Vec<ForumPost>) -> Vec<ForumThread> {
        let ids: HashSet<String> = posts.iter().map(|p| p.id.clone()).collect();
        let mut children: HashMap<String, Vec<ForumPost>> = HashMap::new();
        let mut roots = Vec::new();

        for post in posts {
            match post.parent_id.clone() {
                Some(parent) if ids.contains(&parent) && parent != post.id => {
                    children.entry(parent).or_default().push(post)
                }
                _ => roots.push(post),
            }
        }

        roots.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let mut threads: Vec<ForumThread> = roots
            .into_iter()
            .map(|post| Self::attach(post, &mut children))
            .collect();

        // Parent chains that loop never reach a root.
        while let Some(post) = Self::take_earliest(&mut children) {
            threads.push(Self::attach(post, &mut children));
        }
        threads
    }

    fn take_earliest(children: &mut HashMap<String, Vec<ForumPost>>) -> Option<ForumPost> {
        let (parent, index) = children
            .iter()
            .flat_map(|(parent, posts)| posts.iter().enumerate().map(move |(i, p)| (parent, i, p)))
            .min_by(|a, b| a.2.created_at.cmp(&b.2.created_at).then_with(|| a.2.id.cmp(&b.2.id)))
            .map(|(parent, index, _)| (parent.clone(), index))?;

        let siblings = children.get_mut(&parent)?;
        let post = siblings.remove(index);
        if siblings.is_empty() {
            children.remove(&parent);
        }
        Some(post)
    }

    fn attach(post: ForumPost, children: &mut HashMap<String, Vec<ForumPost>>) -> ForumThread {
        let mut replies = children.remove(&post.id).unwrap_or_default();
        replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        ForumThread {
            replies: replies
                .into_iter()
                .map(|reply| Self::attach(reply, children))
                .collect(),
            post,
        }
    }

    pub fn post_count(&self) -> usize {
        1 + self.replies.iter().map(ForumThread::post_count).sum::<usize>()
    }
}

pub struct ForumsPage {
    state: AppState,
}

impl ForumsPage {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, user: &User, filter: &ForumFilter) -> Result<Vec<ForumWithCourse>, AppError> {
        let courses = queries::fetch_courses_for(&self.state, user).await?;
        let per_course = try_join_all(courses.iter().map(|c| queries::fetch_forums(&self.state, &c.id))).await?;

        Ok(courses
            .into_iter()
            .zip(per_course)
            .flat_map(|(course, forums)| {
                forums.into_iter().map(move |forum| ForumWithCourse {
                    forum,
                    course: course.clone(),
                })
            })
            .filter(|fc| filter.matches(&fc.forum))
            .collect())
    }

    pub async fn threads(&self, forum_id: &str) -> Result<Vec<ForumThread>, AppError> {
        let posts = queries::fetch_forum_posts(&self.state, forum_id).await?;
        Ok(ForumThread::build(posts))
    }

    pub async fn create_forum(&self, user: &User, course_id: &str, title: &str, description: Option<String>) -> Result<Forum, AppError> {
        access::ensure(
            user,
            |p| p.can_create_courses,
            "You don't have permission to create forums.",
        )?;
        let forum = NewForum {
            course_id: course_id.to_string(),
            title: title.to_string(),
            description,
            created_by: user.id.clone(),
            is_active: true,
        };
        forum.validate()?;

        let created = self.state.api.create_forum(&forum).await?;
        info!("created forum {} in course {}", created.id, course_id);
        self.state.cache.invalidate(&keys::forums(course_id)).await;
        Ok(created)
    }

    pub async fn post(
        &self,
        user: &User,
        forum_id: &str,
        content: &str,
        parent_id: Option<String>,
    ) -> Result<ForumPost, AppError> {
        let post = NewForumPost {
            forum_id: forum_id.to_string(),
            parent_id,
            content: content.to_string(),
            author_id: user.id.clone(),
        };
        post.validate()?;

        let created = self.state.api.create_forum_post(&post).await?;
        self.state.cache.invalidate(&keys::forum_posts(forum_id)).await;
        Ok(created)
    }
}
