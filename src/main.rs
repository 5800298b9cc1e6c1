#[macro_use]
extern crate rocket;

use std::fs;
use std::path::Path;

use rocket::{Build, Rocket};

use crate::handler::file_handler::{
    delete_file, get_files_in_folder, get_my_files, get_public_file, rename_file, upload_file,
};
use crate::handler::folder_handler::{
    create_folder, delete_folder, get_my_folders, rename_folder,
};
use crate::repository::initialize_db;

mod config;
mod guard;
mod handler;
mod model;
mod remote;
mod repository;
mod service;
#[cfg(test)]
mod test;

static TEMP_DIR: &str = "./.cloudbox_temp";

#[cfg(not(test))]
pub fn temp_dir() -> String {
    String::from(TEMP_DIR)
}

/// each test thread stages uploads in its own directory, the same way each
/// test thread gets its own database file, so tests can run in parallel
#[cfg(test)]
pub fn temp_dir() -> String {
    format!("{TEMP_DIR}_{}", test::current_thread_name())
}

#[cfg(not(test))]
fn init_logger() {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(std::time::SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .apply()
        .unwrap();
}

#[launch]
fn rocket() -> Rocket<Build> {
    #[cfg(not(test))]
    init_logger();
    initialize_db().unwrap();
    // staging copies left behind by crashed or failed uploads are useless
    // after a restart, so the whole staging directory gets swept
    fs::remove_dir_all(Path::new(temp_dir().as_str()))
        .or(Ok::<(), ()>(()))
        .unwrap();
    fs::create_dir_all(Path::new(temp_dir().as_str())).unwrap();
    rocket::build()
        .mount(
            "/files",
            routes![
                upload_file,
                get_my_files,
                get_files_in_folder,
                get_public_file,
                rename_file,
                delete_file
            ],
        )
        .mount(
            "/folders",
            routes![create_folder, get_my_folders, rename_folder, delete_folder],
        )
}

#[cfg(test)]
mod file_tests {
    use rocket::http::{ContentType, Header, Status};
    use rocket::local::blocking::Client;

    use crate::guard::IDENTITY_HEADER;
    use crate::model::resource_kind::ResourceKind;
    use crate::model::response::file_responses::FileApi;
    use crate::remote;
    use crate::test::{
        cleanup, create_file_db_entry, create_folder_db_entry, refresh_db, USER_1, USER_2,
    };

    use super::rocket;

    fn client() -> Client {
        Client::tracked(rocket()).expect("Valid Rocket Instance")
    }

    fn identity(user: &str) -> Header<'static> {
        Header::new(IDENTITY_HEADER, String::from(user))
    }

    fn multipart() -> Header<'static> {
        Header::new("Content-Type", "multipart/form-data; boundary=BOUNDARY")
    }

    #[test]
    fn upload_file() {
        refresh_db();
        let client = client();
        let body = "--BOUNDARY\r\n\
Content-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n\
Content-Type: text/plain\r\n\
\r\n\
hello world\r\n\
--BOUNDARY\r\n\
Content-Disposition: form-data; name=\"extension\"\r\n\
\r\n\
txt\r\n\
--BOUNDARY--";
        let res = client
            .post(uri!("/files/upload"))
            .header(identity(USER_1))
            .header(multipart())
            .body(body)
            .dispatch();
        assert_eq!(res.status(), Status::Created);
        let res_body: FileApi = res.into_json().unwrap();
        assert_eq!(1, res_body.id);
        assert_eq!("notes", res_body.name);
        assert_eq!("txt", res_body.format);
        assert_eq!(11, res_body.size);
        assert_eq!(None, res_body.folder_id);
        assert_eq!("mock/notes", res_body.locator);
        assert_eq!("https://blob.invalid/mock/notes", res_body.url);
        let uploads = remote::mock::uploads();
        assert_eq!(1, uploads.len());
        assert_eq!("notes", uploads[0].original_name);
        // with no custom name, the record is named what the store reported
        assert_eq!(uploads[0].original_name, res_body.name);
        cleanup();
    }

    #[test]
    fn upload_file_custom_name() {
        refresh_db();
        let client = client();
        let body = "--BOUNDARY\r\n\
Content-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n\
Content-Type: text/plain\r\n\
\r\n\
hello world\r\n\
--BOUNDARY\r\n\
Content-Disposition: form-data; name=\"extension\"\r\n\
\r\n\
txt\r\n\
--BOUNDARY\r\n\
Content-Disposition: form-data; name=\"customName\"\r\n\
\r\n\
report-final\r\n\
--BOUNDARY--";
        let res = client
            .post(uri!("/files/upload"))
            .header(identity(USER_1))
            .header(multipart())
            .body(body)
            .dispatch();
        assert_eq!(res.status(), Status::Created);
        let res_body: FileApi = res.into_json().unwrap();
        assert_eq!("report-final", res_body.name);
        // the custom name doubles as the remote key
        assert_eq!("mock/report-final", res_body.locator);
        cleanup();
    }

    #[test]
    fn upload_file_into_folder() {
        refresh_db();
        let folder_id = create_folder_db_entry(USER_1, "stuff");
        let client = client();
        let body = format!(
            "--BOUNDARY\r\n\
Content-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n\
Content-Type: text/plain\r\n\
\r\n\
hello world\r\n\
--BOUNDARY\r\n\
Content-Disposition: form-data; name=\"extension\"\r\n\
\r\n\
txt\r\n\
--BOUNDARY\r\n\
Content-Disposition: form-data; name=\"folderId\"\r\n\
\r\n\
{folder_id}\r\n\
--BOUNDARY--"
        );
        let res = client
            .post(uri!("/files/upload"))
            .header(identity(USER_1))
            .header(multipart())
            .body(body)
            .dispatch();
        assert_eq!(res.status(), Status::Created);
        let res_body: FileApi = res.into_json().unwrap();
        assert_eq!(Some(folder_id), res_body.folder_id);
        let listed: Vec<FileApi> = client
            .get(format!("/files/folder/{folder_id}"))
            .header(identity(USER_1))
            .dispatch()
            .into_json()
            .unwrap();
        assert_eq!(1, listed.len());
        assert_eq!("notes", listed[0].name);
        cleanup();
    }

    #[test]
    fn upload_file_bad_folder_id() {
        refresh_db();
        let client = client();
        let body = "--BOUNDARY\r\n\
Content-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n\
Content-Type: text/plain\r\n\
\r\n\
hello world\r\n\
--BOUNDARY\r\n\
Content-Disposition: form-data; name=\"folderId\"\r\n\
\r\n\
abc\r\n\
--BOUNDARY--";
        let res = client
            .post(uri!("/files/upload"))
            .header(identity(USER_1))
            .header(multipart())
            .body(body)
            .dispatch();
        assert_eq!(res.status(), Status::BadRequest);
        assert!(remote::mock::uploads().is_empty());
        cleanup();
    }

    #[test]
    fn upload_file_missing_file() {
        refresh_db();
        let client = client();
        // a file part without a filename carries no name the record could use
        let body = "--BOUNDARY\r\n\
Content-Disposition: form-data; name=\"file\"\r\n\
\r\n\
hello world\r\n\
--BOUNDARY--";
        let res = client
            .post(uri!("/files/upload"))
            .header(identity(USER_1))
            .header(multipart())
            .body(body)
            .dispatch();
        assert_eq!(res.status(), Status::BadRequest);
        cleanup();
    }

    #[test]
    fn upload_file_without_file_part() {
        refresh_db();
        let client = client();
        let body = "--BOUNDARY\r\n\
Content-Disposition: form-data; name=\"customName\"\r\n\
\r\n\
report\r\n\
--BOUNDARY--";
        let res = client
            .post(uri!("/files/upload"))
            .header(identity(USER_1))
            .header(multipart())
            .body(body)
            .dispatch();
        assert_eq!(res.status(), Status::BadRequest);
        assert!(remote::mock::uploads().is_empty());
        cleanup();
    }

    #[test]
    fn upload_file_without_identity() {
        refresh_db();
        let client = client();
        let res = client.post(uri!("/files/upload")).dispatch();
        assert_eq!(res.status(), Status::Unauthorized);
        cleanup();
    }

    #[test]
    fn upload_file_remote_failure_keeps_no_record() {
        refresh_db();
        remote::mock::set_fail_uploads(true);
        let client = client();
        let body = "--BOUNDARY\r\n\
Content-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n\
Content-Type: text/plain\r\n\
\r\n\
hello world\r\n\
--BOUNDARY\r\n\
Content-Disposition: form-data; name=\"extension\"\r\n\
\r\n\
txt\r\n\
--BOUNDARY--";
        let res = client
            .post(uri!("/files/upload"))
            .header(identity(USER_1))
            .header(multipart())
            .body(body)
            .dispatch();
        assert_eq!(res.status(), Status::InternalServerError);
        // nothing remote, nothing local
        assert!(remote::mock::uploads().is_empty());
        let listed: Vec<FileApi> = client
            .get(uri!("/files/my-files"))
            .header(identity(USER_1))
            .dispatch()
            .into_json()
            .unwrap();
        assert!(listed.is_empty());
        cleanup();
    }

    #[test]
    fn get_my_files_scoped_to_owner() {
        refresh_db();
        create_file_db_entry(USER_1, "first", "txt", None);
        create_file_db_entry(USER_1, "second", "txt", None);
        create_file_db_entry(USER_2, "other", "txt", None);
        let client = client();
        let listed: Vec<FileApi> = client
            .get(uri!("/files/my-files"))
            .header(identity(USER_1))
            .dispatch()
            .into_json()
            .unwrap();
        let names: Vec<String> = listed.into_iter().map(|f| f.name).collect();
        // newest first
        assert_eq!(vec!["second", "first"], names);
        cleanup();
    }

    #[test]
    fn get_files_in_folder_excludes_unfiled() {
        refresh_db();
        let folder_id = create_folder_db_entry(USER_1, "stuff");
        create_file_db_entry(USER_1, "filed", "txt", Some(folder_id));
        create_file_db_entry(USER_1, "unfiled", "txt", None);
        let client = client();
        let listed: Vec<FileApi> = client
            .get(format!("/files/folder/{folder_id}"))
            .header(identity(USER_1))
            .dispatch()
            .into_json()
            .unwrap();
        assert_eq!(1, listed.len());
        assert_eq!("filed", listed[0].name);
        cleanup();
    }

    #[test]
    fn get_public_file_needs_no_identity() {
        refresh_db();
        let id = create_file_db_entry(USER_1, "notes", "txt", None);
        let client = client();
        let res = client.get(format!("/files/public/{id}")).dispatch();
        assert_eq!(res.status(), Status::Ok);
        let text = res.into_string().unwrap();
        assert!(text.contains("\"name\":\"notes\""));
        assert!(text.contains("\"format\":\"txt\""));
        // the public projection never exposes the owner or the remote handle
        assert!(!text.contains("locator"));
        assert!(!text.contains(USER_1));
        cleanup();
    }

    #[test]
    fn get_public_file_not_found() {
        refresh_db();
        let client = client();
        let res = client.get(uri!("/files/public/23")).dispatch();
        assert_eq!(res.status(), Status::NotFound);
        cleanup();
    }

    #[test]
    fn rename_file() {
        refresh_db();
        let id = create_file_db_entry(USER_1, "notes", "txt", None);
        let client = client();
        let res = client
            .put(format!("/files/rename/{id}"))
            .header(identity(USER_1))
            .header(ContentType::JSON)
            .body(r#"{"name": "  meeting notes  "}"#)
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        let res_body: FileApi = res.into_json().unwrap();
        assert_eq!("meeting notes", res_body.name);
        let listed: Vec<FileApi> = client
            .get(uri!("/files/my-files"))
            .header(identity(USER_1))
            .dispatch()
            .into_json()
            .unwrap();
        assert_eq!("meeting notes", listed[0].name);
        // renaming to the same name again changes nothing
        let res = client
            .put(format!("/files/rename/{id}"))
            .header(identity(USER_1))
            .header(ContentType::JSON)
            .body(r#"{"name": "  meeting notes  "}"#)
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        let repeat: FileApi = res.into_json().unwrap();
        assert_eq!(res_body, repeat);
        cleanup();
    }

    #[test]
    fn rename_file_blank_name() {
        refresh_db();
        let id = create_file_db_entry(USER_1, "notes", "txt", None);
        let client = client();
        let res = client
            .put(format!("/files/rename/{id}"))
            .header(identity(USER_1))
            .header(ContentType::JSON)
            .body(r#"{"name": "   "}"#)
            .dispatch();
        assert_eq!(res.status(), Status::BadRequest);
        cleanup();
    }

    #[test]
    fn rename_file_not_owner() {
        refresh_db();
        let id = create_file_db_entry(USER_1, "notes", "txt", None);
        let client = client();
        let res = client
            .put(format!("/files/rename/{id}"))
            .header(identity(USER_2))
            .header(ContentType::JSON)
            .body(r#"{"name": "stolen"}"#)
            .dispatch();
        assert_eq!(res.status(), Status::Forbidden);
        let listed: Vec<FileApi> = client
            .get(uri!("/files/my-files"))
            .header(identity(USER_1))
            .dispatch()
            .into_json()
            .unwrap();
        assert_eq!("notes", listed[0].name);
        cleanup();
    }

    #[test]
    fn rename_file_not_found() {
        refresh_db();
        let client = client();
        let res = client
            .put(uri!("/files/rename/23"))
            .header(identity(USER_1))
            .header(ContentType::JSON)
            .body(r#"{"name": "anything"}"#)
            .dispatch();
        assert_eq!(res.status(), Status::NotFound);
        cleanup();
    }

    #[test]
    fn delete_file() {
        refresh_db();
        let id = create_file_db_entry(USER_1, "selfie", "png", None);
        let client = client();
        let res = client
            .delete(format!("/files/{id}"))
            .header(identity(USER_1))
            .dispatch();
        assert_eq!(res.status(), Status::NoContent);
        // the remote object went first, under the kind its format maps to
        assert_eq!(
            vec![(String::from("mock/selfie"), ResourceKind::Image)],
            remote::mock::deletes()
        );
        let res = client.get(format!("/files/public/{id}")).dispatch();
        assert_eq!(res.status(), Status::NotFound);
        cleanup();
    }

    #[test]
    fn delete_file_not_owner() {
        refresh_db();
        let id = create_file_db_entry(USER_1, "selfie", "png", None);
        let client = client();
        let res = client
            .delete(format!("/files/{id}"))
            .header(identity(USER_2))
            .dispatch();
        assert_eq!(res.status(), Status::Forbidden);
        assert!(remote::mock::deletes().is_empty());
        let res = client.get(format!("/files/public/{id}")).dispatch();
        assert_eq!(res.status(), Status::Ok);
        cleanup();
    }

    #[test]
    fn delete_file_remote_failure_keeps_record() {
        refresh_db();
        let id = create_file_db_entry(USER_1, "selfie", "png", None);
        remote::mock::set_fail_deletes(true);
        let client = client();
        let res = client
            .delete(format!("/files/{id}"))
            .header(identity(USER_1))
            .dispatch();
        assert_eq!(res.status(), Status::InternalServerError);
        // the record survives so the remote copy stays accounted for
        let res = client.get(format!("/files/public/{id}")).dispatch();
        assert_eq!(res.status(), Status::Ok);
        cleanup();
    }

    #[test]
    fn delete_file_not_found() {
        refresh_db();
        let client = client();
        let res = client
            .delete(uri!("/files/23"))
            .header(identity(USER_1))
            .dispatch();
        assert_eq!(res.status(), Status::NotFound);
        cleanup();
    }

    #[test]
    fn file_lifecycle() {
        refresh_db();
        let client = client();
        let body = "--BOUNDARY\r\n\
Content-Disposition: form-data; name=\"file\"; filename=\"report.pdf\"\r\n\
Content-Type: application/pdf\r\n\
\r\n\
not really a pdf\r\n\
--BOUNDARY\r\n\
Content-Disposition: form-data; name=\"extension\"\r\n\
\r\n\
pdf\r\n\
--BOUNDARY--";
        let res = client
            .post(uri!("/files/upload"))
            .header(identity(USER_1))
            .header(multipart())
            .body(body)
            .dispatch();
        assert_eq!(res.status(), Status::Created);
        let uploaded: FileApi = res.into_json().unwrap();
        assert_eq!(None, uploaded.folder_id);
        let listed: Vec<FileApi> = client
            .get(uri!("/files/my-files"))
            .header(identity(USER_1))
            .dispatch()
            .into_json()
            .unwrap();
        assert_eq!(vec![uploaded.clone()], listed);
        // someone else can't remove it
        let res = client
            .delete(format!("/files/{}", uploaded.id))
            .header(identity(USER_2))
            .dispatch();
        assert_eq!(res.status(), Status::Forbidden);
        let res = client
            .get(format!("/files/public/{}", uploaded.id))
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        // the owner can
        let res = client
            .delete(format!("/files/{}", uploaded.id))
            .header(identity(USER_1))
            .dispatch();
        assert_eq!(res.status(), Status::NoContent);
        assert_eq!(
            vec![(uploaded.locator, ResourceKind::Raw)],
            remote::mock::deletes()
        );
        let res = client
            .get(format!("/files/public/{}", uploaded.id))
            .dispatch();
        assert_eq!(res.status(), Status::NotFound);
        cleanup();
    }
}
