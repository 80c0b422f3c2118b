mod delete_test;
mod patch_test;
mod post_test;
