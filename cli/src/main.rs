use clap::{Parser, Subcommand};
use lectern::auth::{UserClaims, generate_token, hash_password, verify_password};
use lectern::error::AppResult;
use lectern::model::entity::{
    Category, CategoryCreate, ContentType, Course, CourseCreate, Enrollment, EnrollmentCreate,
    Lecture, LectureCreate, Section, SectionCreate, UserEntity, UserEntityCreate,
};
use lectern::model::{CrudRepository, DatabaseError, DbConnection, ModelManager, ProgressTracker};
use lectern::web::{AuthenticatedUser, UserRole};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(about = "CLI tool for filling and maintaining the course catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryCommands,
    },

    /// Manage courses
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },

    /// Manage course sections
    Section {
        #[command(subcommand)]
        action: SectionCommands,
    },

    /// Manage lectures
    Lecture {
        #[command(subcommand)]
        action: LectureCommands,
    },

    /// Manage enrollments
    Enrollment {
        #[command(subcommand)]
        action: EnrollmentCommands,
    },

    /// Inspect student progress
    Progress {
        #[command(subcommand)]
        action: ProgressCommands,
    },
}

/// User management
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    Add {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
        /// student, instructor or admin
        #[arg(long, default_value = "student")]
        role: String,
    },
    /// Issue a session token for the SID cookie
    Token {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value_t = 24)]
        hours: i64,
    },
}

/// Category management
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
}

/// Course management
#[derive(Subcommand, Debug)]
pub enum CourseCommands {
    Add {
        #[arg(long)]
        category_name: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        price_cents: Option<i64>,
    },
    Remove {
        #[arg(long)]
        title: String,
    },
}

/// Section management
#[derive(Subcommand, Debug)]
pub enum SectionCommands {
    Add {
        /// Course title to attach the section to
        #[arg(long)]
        course_title: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        position: Option<i32>,
    },
}

/// Lecture management
#[derive(Subcommand, Debug)]
pub enum LectureCommands {
    Add {
        #[arg(long)]
        section_id: Uuid,
        #[arg(long)]
        title: String,
        /// video, article or file
        #[arg(long, default_value = "video")]
        content_type: String,
        /// Seconds
        #[arg(long, default_value_t = 0)]
        duration: i32,
        #[arg(long)]
        position: Option<i32>,
    },
    /// Delete a lecture and refresh the progress of every student in its course
    Remove {
        #[arg(long)]
        id: Uuid,
    },
}

/// Enrollment management
#[derive(Subcommand, Debug)]
pub enum EnrollmentCommands {
    Add {
        #[arg(long)]
        email: String,
        #[arg(long)]
        course_title: String,
    },
    /// Unenroll a student and drop their progress in the course
    Remove {
        #[arg(long)]
        email: String,
        #[arg(long)]
        course_title: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProgressCommands {
    Show {
        #[arg(long)]
        email: String,
    },
}

async fn user_by_email(mm: &ModelManager, actor: &AuthenticatedUser, email: &str) -> AppResult<UserEntity> {
    UserEntity::find_by_email(mm, actor, email)
        .await?
        .ok_or_else(|| DatabaseError::validation(format!("no user with email `{email}`")).into())
}

async fn course_by_title(mm: &ModelManager, actor: &AuthenticatedUser, title: &str) -> AppResult<Course> {
    Course::find_by_title(mm, actor, title)
        .await?
        .ok_or_else(|| DatabaseError::validation(format!("no course titled `{title}`")).into())
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    let config = lectern::Config::get_or_init(true).await;
    let database_uri = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| config.app().database_uri().to_string());

    let db_con = DbConnection::connect(&database_uri)?;
    db_con.migrate().await?;
    let mm = ModelManager::new(db_con);
    let tracker = ProgressTracker::new(mm.clone());
    let actor = AuthenticatedUser::admin();

    match args.command {
        Commands::User { action } => match action {
            UserCommands::Add { email, name, password, role } => {
                let user = UserEntity::create(
                    &mm,
                    &actor,
                    UserEntityCreate {
                        email,
                        name,
                        password_hash: hash_password(&password)?,
                        role: UserRole::from(role.as_str()),
                    },
                )
                .await?;
                println!("User created: {:?}", user);
            }

            UserCommands::Token { email, password, hours } => {
                let user = user_by_email(&mm, &actor, &email).await?;
                if !verify_password(&password, user.hash())? {
                    return Err(DatabaseError::validation("password mismatch").into());
                }

                let claims = UserClaims {
                    sub: user.id().to_string(),
                    exp: chrono::Utc::now().timestamp() + hours * 3600,
                };
                let token = generate_token(claims, config.app().jwt())
                    .map_err(lectern::auth::CryptError::from)?;
                println!("{token}");
            }
        },

        Commands::Category { action } => match action {
            CategoryCommands::Add { name, description } => {
                let category =
                    Category::create(&mm, &actor, CategoryCreate { name, description }).await?;
                println!("Category created: {:?}", category);
            }
        },

        Commands::Course { action } => match action {
            CourseCommands::Add { category_name, title, description, price_cents } => {
                let category_id: Uuid =
                    sqlx::query_scalar("SELECT id FROM categories WHERE name = $1")
                        .bind(&category_name)
                        .fetch_one(mm.executor())
                        .await
                        .map_err(DatabaseError::SqlxError)?;

                let course = Course::create(
                    &mm,
                    &actor,
                    CourseCreate {
                        category_id,
                        title,
                        description,
                        price_cents,
                    },
                )
                .await?;
                println!("Course created: {:?}", course);
            }

            CourseCommands::Remove { title } => {
                let course = course_by_title(&mm, &actor, &title).await?;
                course.remove(&mm, &actor).await?;
                println!("Course removed: {title}");
            }
        },

        Commands::Section { action } => match action {
            SectionCommands::Add { course_title, title, position } => {
                let course = course_by_title(&mm, &actor, &course_title).await?;
                let section = Section::create(
                    &mm,
                    &actor,
                    SectionCreate {
                        course_id: course.id(),
                        title,
                        position,
                    },
                )
                .await?;
                println!("Section created: {:?}", section);
            }
        },

        Commands::Lecture { action } => match action {
            LectureCommands::Add { section_id, title, content_type, duration, position } => {
                let lecture = Lecture::create(
                    &mm,
                    &actor,
                    LectureCreate {
                        section_id,
                        title,
                        content_type: content_type.parse::<ContentType>()?,
                        duration,
                        position,
                    },
                )
                .await?;
                println!("Lecture created: {:?}", lecture);
            }

            LectureCommands::Remove { id } => {
                let affected = tracker.remove_lecture(id).await?;
                println!("Lecture removed, {affected} course progress record(s) refreshed");
            }
        },

        Commands::Enrollment { action } => match action {
            EnrollmentCommands::Add { email, course_title } => {
                let user = user_by_email(&mm, &actor, &email).await?;
                let course = course_by_title(&mm, &actor, &course_title).await?;
                let enrollment = Enrollment::create(
                    &mm,
                    &actor,
                    EnrollmentCreate {
                        student_id: user.id(),
                        course_id: course.id(),
                    },
                )
                .await?;
                println!("Enrollment created: {:?}", enrollment);
            }

            EnrollmentCommands::Remove { email, course_title } => {
                let user = user_by_email(&mm, &actor, &email).await?;
                let course = course_by_title(&mm, &actor, &course_title).await?;
                let deleted = tracker.unenroll(user.id(), course.id()).await?;
                println!("Enrollment removed, {deleted} lecture progress record(s) dropped");
            }
        },

        Commands::Progress { action } => match action {
            ProgressCommands::Show { email } => {
                let user = user_by_email(&mm, &actor, &email).await?;
                for progress in tracker.list_course_progress(user.id()).await? {
                    println!(
                        "{}  {}/{}  {:.2}%",
                        progress.course_id(),
                        progress.completed_lectures(),
                        progress.total_lectures(),
                        progress.progress_percentage()
                    );
                }
            }
        },
    }

    Ok(())
}
