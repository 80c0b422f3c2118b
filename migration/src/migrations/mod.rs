pub mod m202510160001_create_courses;
