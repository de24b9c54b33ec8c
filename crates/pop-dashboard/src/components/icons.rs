//! Inline SVG icon components
//!
//! Icons ship inside the bundle so the dashboard makes no external
//! requests for assets.

use leptos::*;

macro_rules! icon {
    ($(#[$meta:meta])* $name:ident, $path:expr) => {
        $(#[$meta])*
        #[component]
        pub fn $name() -> impl IntoView {
            view! {
                <svg
                    xmlns="http://www.w3.org/2000/svg"
                    viewBox="0 0 24 24"
                    fill="none"
                    stroke="currentColor"
                    stroke-width="2"
                    stroke-linecap="round"
                    stroke-linejoin="round"
                    class="icon"
                    aria-hidden="true"
                >
                    <path d=$path/>
                </svg>
            }
        }
    };
}

icon!(PlusIcon, "M12 5v14M5 12h14");
icon!(PencilIcon, "M17 3a2.85 2.83 0 1 1 4 4L7.5 20.5 2 22l1.5-5.5Z");
icon!(TrashIcon, "M3 6h18M19 6v14a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2V6m3 0V4a2 2 0 0 1 2-2h4a2 2 0 0 1 2 2v2");
icon!(CheckCircleIcon, "M22 11.08V12a10 10 0 1 1-5.93-9.14M22 4 12 14.01l-3-3");
icon!(XIcon, "M18 6 6 18M6 6l12 12");
icon!(ArrowLeftIcon, "m12 19-7-7 7-7M5 12h14");
icon!(FileIcon, "M15 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V7Zm-1 0v5h5");
icon!(EyeIcon, "M2 12s3-7 10-7 10 7 10 7-3 7-10 7-10-7-10-7Zm10 3a3 3 0 1 0 0-6 3 3 0 0 0 0 6Z");
icon!(EyeOffIcon, "M9.88 9.88a3 3 0 1 0 4.24 4.24M6.61 6.61A13.5 13.5 0 0 0 2 12s3 7 10 7a9.74 9.74 0 0 0 5.39-1.61M2 2l20 20");
icon!(LogOutIcon, "M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4m7 14 5-5-5-5m5 5H9");
icon!(MenuIcon, "M4 6h16M4 12h16M4 18h16");
icon!(PopsicleIcon, "M12 2a6 6 0 0 1 6 6v6a2 2 0 0 1-2 2H8a2 2 0 0 1-2-2V8a6 6 0 0 1 6-6Zm0 14v6");
