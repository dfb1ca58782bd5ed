/// HTML view rendering
///
/// Templates are minijinja sources compiled into the binary as constants
/// and registered once in a shared [`Environment`]. Handlers call the
/// `render_*` helpers with plain data; expected form failures are passed
/// back in as an optional `error` string and shown inline.

use minijinja::{context, Environment};
use taskboard_shared::models::task::Task;

/// Task list page, shown at `/` to authenticated users
const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Taskboard</title>
</head>
<body>
  <header>
    <h1>Taskboard</h1>
    <p>Signed in as {{ username }} · <a href="/logout">Log out</a></p>
  </header>
  <form action="/add" method="post">
    <input type="text" name="title" placeholder="Title">
    <input type="text" name="description" placeholder="Description (optional)">
    <button type="submit">Add task</button>
  </form>
  {% if tasks %}
  <ul>
    {% for task in tasks %}
    <li>
      <strong>{{ task.title }}</strong>
      {% if task.description %}<span>: {{ task.description }}</span>{% endif %}
      <form action="/delete/{{ task.id }}" method="post">
        <button type="submit">Delete</button>
      </form>
    </li>
    {% endfor %}
  </ul>
  {% else %}
  <p>No tasks yet.</p>
  {% endif %}
</body>
</html>
"#;

/// Login form, shown at `/login`
const LOGIN_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Log in · Taskboard</title>
</head>
<body>
  <h1>Log in</h1>
  {% if error %}<p class="error">{{ error }}</p>{% endif %}
  <form action="/login" method="post">
    <input type="text" name="identifier" placeholder="Username or email">
    <input type="password" name="password" placeholder="Password">
    <button type="submit">Log in</button>
  </form>
  <p>No account? <a href="/register">Register</a></p>
</body>
</html>
"#;

/// Registration form, shown at `/register`
const REGISTER_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Register · Taskboard</title>
</head>
<body>
  <h1>Register</h1>
  {% if error %}<p class="error">{{ error }}</p>{% endif %}
  <form action="/register" method="post">
    <input type="text" name="username" placeholder="Username">
    <input type="text" name="email" placeholder="Email">
    <input type="password" name="password" placeholder="Password">
    <button type="submit">Register</button>
  </form>
  <p>Already registered? <a href="/login">Log in</a></p>
</body>
</html>
"#;

/// Builds the template environment used for the process lifetime
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("index", INDEX_TEMPLATE)?;
    env.add_template("login", LOGIN_TEMPLATE)?;
    env.add_template("register", REGISTER_TEMPLATE)?;
    Ok(env)
}

/// Renders the task list page
pub fn render_index(
    env: &Environment<'_>,
    username: &str,
    tasks: &[Task],
) -> Result<String, minijinja::Error> {
    env.get_template("index")?.render(context! { username, tasks })
}

/// Renders the login form, optionally with an inline error
pub fn render_login(
    env: &Environment<'_>,
    error: Option<&str>,
) -> Result<String, minijinja::Error> {
    env.get_template("login")?.render(context! { error })
}

/// Renders the registration form, optionally with an inline error
pub fn render_register(
    env: &Environment<'_>,
    error: Option<&str>,
) -> Result<String, minijinja::Error> {
    env.get_template("register")?.render(context! { error })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_task(id: i64, title: &str, description: Option<&str>) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: description.map(String::from),
            completed: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_index_lists_tasks() {
        let env = environment().unwrap();
        let tasks = vec![
            sample_task(1, "Buy milk", None),
            sample_task(2, "Walk the dog", Some("Before lunch")),
        ];

        let html = render_index(&env, "alice", &tasks).unwrap();

        assert!(html.contains("Signed in as alice"));
        assert!(html.contains("Buy milk"));
        assert!(html.contains("Before lunch"));
        assert!(html.contains("/delete/1"));
        assert!(html.contains("/delete/2"));
    }

    #[test]
    fn test_render_index_empty_board() {
        let env = environment().unwrap();
        let html = render_index(&env, "alice", &[]).unwrap();

        assert!(html.contains("No tasks yet."));
    }

    #[test]
    fn test_render_login_with_error() {
        let env = environment().unwrap();
        let html = render_login(&env, Some("Wrong credentials")).unwrap();

        assert!(html.contains("Wrong credentials"));
    }

    #[test]
    fn test_render_login_without_error() {
        let env = environment().unwrap();
        let html = render_login(&env, None).unwrap();

        assert!(!html.contains("class=\"error\""));
        assert!(html.contains("/register"));
    }

    #[test]
    fn test_render_register_with_conflict() {
        let env = environment().unwrap();
        let html = render_register(&env, Some("Username or email already exists")).unwrap();

        assert!(html.contains("Username or email already exists"));
    }
}
