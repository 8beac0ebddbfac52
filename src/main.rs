use clap::Parser;
use rosetint::application::render::{post_toc, render_post_page};
use rosetint::application::{
    init::init, CategoryService, ImageService, PostService, PostUpdate, Session, SettingsService,
};
use rosetint::cli::output::{
    format_category_list, format_cleanup_report, format_image_list, format_post_list,
    format_settings, format_toc,
};
use rosetint::cli::{CategoryCommand, Cli, Commands, ImageCommand, PostCommand, SettingsCommand};
use rosetint::domain::{PostQuery, SortDirection, SortOption};
use rosetint::error::RosetintError;
use rosetint::infrastructure::config::resolve_data_dir;
use rosetint::infrastructure::{Config, EditorSession, FileStore, LoadOrigin};
use std::fs;
use std::path::Path;
use std::str::FromStr;

fn main() {
    let cli = Cli::parse();
    rosetint::logging::init(cli.verbose);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), RosetintError> {
    let root = resolve_data_dir(cli.root.as_deref())?;

    match cli.command {
        Commands::Init => {
            let origin = init(&root)?;
            println!("Initialized rosetint blog at {}", root.display());
            if origin == LoadOrigin::Stored {
                println!("Existing blog data kept");
            }
            Ok(())
        }
        Commands::Post(command) => run_post(&root, command),
        Commands::Category(command) => run_category(&root, command),
        Commands::Image(command) => run_image(&root, command),
        Commands::Settings(command) => run_settings(&root, command),
        Commands::Render { id, output } => {
            let session = open(&root)?;
            let data = session.data();
            let post = data
                .post(&id)
                .ok_or_else(|| RosetintError::PostNotFound(id.clone()))?;
            let page = render_post_page(data, post);

            match output {
                Some(path) => {
                    fs::write(&path, page)?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{}", page),
            }
            Ok(())
        }
        Commands::Toc { id } => {
            let session = open(&root)?;
            let post = session
                .data()
                .post(&id)
                .ok_or_else(|| RosetintError::PostNotFound(id.clone()))?;
            println!("{}", format_toc(&post_toc(post)).trim_end());
            Ok(())
        }
    }
}

/// Open the session, telling the user when stored data had to be replaced
fn open(root: &Path) -> Result<Session<FileStore>, RosetintError> {
    let session = Session::open_dir(root)?;
    if let LoadOrigin::Recovered { reason, backup } = session.origin() {
        eprintln!(
            "Warning: stored blog data is unreadable ({}); showing the initial dataset. \
            The next change will overwrite it.",
            reason
        );
        match backup {
            Some(key) => eprintln!(
                "A copy of the unreadable data was saved to {}",
                FileStore::new(root.to_path_buf()).path_for(key).display()
            ),
            None => eprintln!("Warning: could not save a copy of the unreadable data"),
        }
    }
    Ok(session)
}

fn run_post(root: &Path, command: PostCommand) -> Result<(), RosetintError> {
    let mut service = PostService::new(open(root)?);

    match command {
        PostCommand::New { category, title } => {
            let post = service.create(category.as_deref(), title.as_deref())?;
            println!("Created post {} ({})", post.id, post.title);
        }
        PostCommand::List {
            category,
            search,
            sort,
            asc,
        } => {
            let query = PostQuery {
                category_id: category,
                search,
                sort: SortOption::from_str(&sort).map_err(RosetintError::InvalidValue)?,
                direction: if asc {
                    SortDirection::Asc
                } else {
                    SortDirection::Desc
                },
            };
            let posts = service.list(&query);
            println!(
                "{}",
                format_post_list(&posts, service.session().data()).trim_end()
            );
        }
        PostCommand::Show { id } => {
            print!("{}", service.get(&id)?.content);
        }
        PostCommand::Edit { id } => {
            let config = Config::load_from_dir(root)?;
            let editor = EditorSession::new(config.get_editor());
            match service.edit_content(&id, &editor, root)? {
                Some(post) => println!("Saved post {}", post.id),
                None => println!("No changes"),
            }
        }
        PostCommand::Set {
            id,
            title,
            category,
            content_file,
        } => {
            let content = content_file.map(fs::read_to_string).transpose()?;
            let update = PostUpdate {
                title,
                content,
                category_id: category,
            };
            if update.is_empty() {
                println!("Nothing to change. Use --title, --category or --content-file");
                return Ok(());
            }
            let post = service.update(&id, update)?;
            println!("Saved post {}", post.id);
        }
        PostCommand::InsertImage { id, image } => {
            service.insert_image(&id, &image)?;
            println!("Inserted image {} into post {}", image, id);
        }
    }

    Ok(())
}

fn run_category(root: &Path, command: CategoryCommand) -> Result<(), RosetintError> {
    let mut service = CategoryService::new(open(root)?);

    match command {
        CategoryCommand::Add { name } => {
            let category = service.add(&name)?;
            println!("{}  {}", category.id, category.name);
        }
        CategoryCommand::Rename { id, name } => {
            let category = service.rename(&id, &name)?;
            println!("Renamed {} to {}", category.id, category.name);
        }
        CategoryCommand::List => {
            println!("{}", format_category_list(&service.list()).trim_end());
        }
    }

    Ok(())
}

fn run_image(root: &Path, command: ImageCommand) -> Result<(), RosetintError> {
    let mut service = ImageService::new(open(root)?);

    match command {
        ImageCommand::Add { paths } => {
            let added = service.add_paths(&paths)?;
            if added.is_empty() {
                println!("No images found");
            }
            for image in added {
                println!("Added {}  {}", image.id, image.name);
            }
        }
        ImageCommand::List => {
            println!(
                "{}",
                format_image_list(&service.list(), service.usage()).trim_end()
            );
        }
        ImageCommand::Cleanup => {
            let report = service.cleanup()?;
            println!("{}", format_cleanup_report(&report).trim_end());
        }
        ImageCommand::Background { id } => {
            service.set_background(id.as_deref())?;
            match id {
                Some(id) => println!("Background image set to {}", id),
                None => println!("Background image cleared"),
            }
        }
        ImageCommand::Lock { id } => {
            service.set_lock_screen(id.as_deref())?;
            match id {
                Some(id) => println!("Lock-screen image set to {}", id),
                None => println!("Lock-screen image cleared"),
            }
        }
    }

    Ok(())
}

fn run_settings(root: &Path, command: SettingsCommand) -> Result<(), RosetintError> {
    let mut service = SettingsService::new(open(root)?);

    match command {
        SettingsCommand::List => {
            print!("{}", format_settings(&service.list()));
        }
        SettingsCommand::Get { key } => {
            println!("{}", service.get(&key)?);
        }
        SettingsCommand::Set { key, value } => {
            service.set(&key, &value)?;
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}
