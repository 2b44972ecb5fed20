/// The fixed tasks the comparison iterates. Each run is a single task
/// string; there is no user interaction.
#[derive(Debug, Clone, Copy)]
pub struct TaskSpec {
    pub name: &'static str,
    pub task: &'static str,
}

pub const TASKS: &[TaskSpec] = &[
    TaskSpec {
        name: "Simple User Query",
        task: "Get information about user with ID 1. Fetch the user's id, name, and email.",
    },
    TaskSpec {
        name: "Hierarchical Data Query",
        task: "Get all posts by user with ID 1. For each post, fetch: id, title, content, likes. \
               For each post, also fetch all comments. For each comment, fetch: id, content, \
               createdAt, and the author's name.",
    },
    TaskSpec {
        name: "Deep Nested Query",
        task: "Get the post with ID 5. Fetch: id, title, content, likes. Also fetch the post \
               author's id, name, and email. Also fetch all comments on that post - for each \
               comment fetch: id, content, createdAt, and the comment author's id and name.",
    },
];
